use std::ffi::OsString;
use std::io::{ErrorKind, Read};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};

#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    #[error("Failed to start ffmpeg: {0}")]
    Spawn(std::io::Error),

    #[error("Failed to read frame from ffmpeg: {0}")]
    Read(std::io::Error),

    #[error("Video stream ended")]
    Exhausted,
}

/// Decode settings shared by every stream of a presentation.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    pub ffmpeg: OsString,
    pub width: i32,
    pub height: i32,
    pub fps: u32,
}

impl DecoderConfig {
    pub fn frame_len(&self) -> usize {
        (self.width * self.height * 4) as usize // 4 bytes per pixel (RGBA)
    }

    /// Loops the input forever, drops audio and cover-fits it to the decode size.
    fn args(&self, source: &str) -> Vec<String> {
        let (w, h) = (self.width, self.height);
        vec![
            "-loglevel".into(), "error".into(),
            "-nostdin".into(),
            "-stream_loop".into(), "-1".into(),
            "-i".into(), source.into(),
            "-an".into(),
            "-vf".into(), format!("scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h}"),
            "-r".into(), self.fps.to_string(),
            "-f".into(), "rawvideo".into(),
            "-pix_fmt".into(), "rgba".into(),
            "-".into(),
        ]
    }
}

type FrameResult = Result<Vec<u8>, VideoError>;

/// One looping background video decoded by an ffmpeg child process.
///
/// A worker thread reads frames off the pipe and hands them over through a
/// channel holding a single frame, so ffmpeg is paced by the render loop and
/// the render loop never waits on ffmpeg.
pub struct VideoStream {
    process: Child,
    frames: Option<Receiver<FrameResult>>,
    worker: Option<JoinHandle<()>>,
    frame: Vec<u8>,
}

impl VideoStream {
    pub fn open(source: &str, config: &DecoderConfig) -> Result<VideoStream, VideoError> {
        let mut process = Command::new(&config.ffmpeg)
            .args(config.args(source))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(VideoError::Spawn)?;
        let Some(stdout) = process.stdout.take() else {
            let _ = process.kill();
            let _ = process.wait();
            return Err(VideoError::Spawn(std::io::Error::other("ffmpeg stdout not captured")));
        };

        let (tx, rx) = mpsc::sync_channel::<FrameResult>(1);
        let frame_len = config.frame_len();
        let worker = thread::Builder::new()
            .name("video-decode".into())
            .spawn(move || decode_loop(stdout, frame_len, tx));
        let worker = match worker {
            Ok(worker) => worker,
            Err(e) => {
                let _ = process.kill();
                let _ = process.wait();
                return Err(VideoError::Spawn(e));
            }
        };

        Ok(VideoStream {
            process,
            frames: Some(rx),
            worker: Some(worker),
            frame: Vec::new(),
        })
    }

    /// Takes the next decoded RGBA frame if one is ready, `Ok(None)` when the
    /// decoder has not caught up yet. Once this fails, it keeps failing with
    /// `Exhausted`.
    pub fn next_frame(&mut self) -> Result<Option<&[u8]>, VideoError> {
        let frames = self.frames.as_ref().ok_or(VideoError::Exhausted)?;
        match frames.try_recv() {
            Ok(Ok(frame)) => {
                self.frame = frame;
                Ok(Some(&self.frame))
            }
            Ok(Err(e)) => {
                self.frames = None;
                Err(e)
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.frames = None;
                Err(VideoError::Exhausted)
            }
        }
    }

    #[cfg(test)]
    fn pid(&self) -> u32 {
        self.process.id()
    }
}

fn decode_loop(mut stdout: ChildStdout, frame_len: usize, frames: SyncSender<FrameResult>) {
    loop {
        let mut frame = vec![0; frame_len];
        let result = match stdout.read_exact(&mut frame) {
            Ok(()) => Ok(frame),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(VideoError::Exhausted),
            Err(e) => Err(VideoError::Read(e)),
        };
        let finished = result.is_err();
        // A closed channel means the stream was dropped
        if frames.send(result).is_err() || finished {
            return;
        }
    }
}

impl Drop for VideoStream {
    fn drop(&mut self) {
        // Drop the receiver first so a worker blocked on a full channel wakes up
        self.frames = None;
        let _ = self.process.kill();
        let _ = self.process.wait();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
