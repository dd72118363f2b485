//! Frame stepping state for the animated bubble chart.

#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    frame_count: usize,
    current: usize,
    playing: bool,
    last_step: Option<f64>,
}

impl Playback {
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            current: 0,
            playing: false,
            last_step: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn last_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    pub fn play(&mut self) {
        if self.frame_count < 2 {
            return;
        }
        if self.current == self.last_frame() {
            self.current = 0;
        }
        self.playing = true;
        self.last_step = None;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn step_forward(&mut self) {
        self.pause();
        self.current = (self.current + 1).min(self.last_frame());
    }

    pub fn step_back(&mut self) {
        self.pause();
        self.current = self.current.saturating_sub(1);
    }

    pub fn seek(&mut self, frame: usize) {
        self.current = frame.min(self.last_frame());
    }

    /// Advance by at most one frame once `interval` seconds have passed.
    ///
    /// Returns `true` if the frame changed. Stops at the last frame.
    pub fn tick(&mut self, now: f64, interval: f64) -> bool {
        if !self.playing {
            return false;
        }
        let Some(last) = self.last_step else {
            self.last_step = Some(now);
            return false;
        };
        if now - last < interval {
            return false;
        }

        self.last_step = Some(now);
        self.current += 1;
        if self.current >= self.last_frame() {
            self.current = self.last_frame();
            self.playing = false;
        }
        true
    }
}
