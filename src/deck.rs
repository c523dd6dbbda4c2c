use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// One unit of presentation content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slide {
    pub id: u32,
    pub speaker: String,
    pub title: String,
    pub text: String,
    pub video: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("Failed to read deck file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse deck file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Deck contains no slides")]
    Empty,

    #[error("Slide at position {position} has id {found}, expected {}", .position + 1)]
    NonSequentialId { position: usize, found: u32 },
}

#[derive(Deserialize)]
struct DeckFile {
    #[serde(default)]
    slides: Vec<Slide>,
}

/// Ordered, non-empty and immutable collection of slides.
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    pub fn new(slides: Vec<Slide>) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }
        for (position, slide) in slides.iter().enumerate() {
            if slide.id as usize != position + 1 {
                return Err(DeckError::NonSequentialId { position, found: slide.id });
            }
        }
        Ok(Self { slides })
    }

    pub fn from_toml_str(source: &str) -> Result<Self, DeckError> {
        let file: DeckFile = toml::from_str(source)?;
        Self::new(file.slides)
    }

    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let source = fs::read_to_string(path).map_err(|source| DeckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// The deck shipped with the player.
    pub fn builtin() -> Self {
        let slides = BUILTIN_SLIDES
            .iter()
            .enumerate()
            .map(|(i, (speaker, title, text, video))| Slide {
                id: i as u32 + 1,
                speaker: speaker.to_string(),
                title: title.to_string(),
                text: text.to_string(),
                video: video.to_string(),
            })
            .collect();
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }
}

impl std::ops::Index<usize> for Deck {
    type Output = Slide;

    fn index(&self, index: usize) -> &Slide {
        &self.slides[index]
    }
}

// (speaker, title, text, video)
const BUILTIN_SLIDES: [(&str, &str, &str, &str); 6] = [
    (
        "Speaker 1",
        "Shimoliy Amerika va Irokezlar",
        "Shimoliy Amerikada Irokezlar yashagan. 'Qizil tanlilar' iborasi jangchilarning badaniga qizil bo'yoq surish odatidan kelib chiqqan. Ular 6-8 metrli uzun yog'och uylarda yashab, 'Besh qabila ittifoqi'ni tuzganlar.",
        "./video1.mp4",
    ),
    (
        "Speaker 2",
        "Eskimoslar va Aleutlar",
        "Shimoliy Kanada va Alyaskada Eskimoslar yashagan. Ular kit va morj ovlashgan, yog'idan yoritishda, terisidan kiyim tikishda foydalanishgan. Dehqonchilikni bilishmagan.",
        "./video2.mp4",
    ),
    (
        "Speaker 3",
        "Mayyalar: Yangi Dunyo Yunonlari",
        "Mayyalar yuksak madaniyati uchun 'Yangi Dunyo yunonlari' deb atalgan. Ular pul o'rnida kakao urug'idan foydalanishgan. Tikal va Chichen-Itsa kabi buyuk shaharlari bo'lgan.",
        "./video3.mp4",
    ),
    (
        "Speaker 4",
        "Atsteklar va Jangchi Martabasi",
        "1325-yilda Tenochtitlan shahriga asos solindi. Atsteklarda o'smir yigitlar birinchi asirini tutmaguncha sochlarini olishiga ruxsat berilmagan. Jangchining martabasi asirlar soniga bog'liq bo'lgan.",
        "./video4.mp4",
    ),
    (
        "Speaker 5",
        "Inklar: Quyosh Imperiyasi",
        "And tog'larida joylashgan Inklar imperiyasining markazi Kusko ('Quyosh shahri') edi. Davlat 4 viloyatga bo'lingan. Hukmdorning hokimiyati cheksiz bo'lib, u ham diniy, ham dunyoviy rahbar edi.",
        "./video5.mp4",
    ),
    (
        "Speaker 6",
        "Inklarning Dehqonchiligi",
        "Inklar tog' yonbag'irlarida terrasalar qurib, kartoshka va makkajo'xori yetishtirishgan. Tog'lardan suv olib kelish uchun osma quvurlar (akveduklar) qurishgan. 1532-yilda ispanlar tomonidan bosib olingan.",
        "./video6.mp4",
    ),
];
