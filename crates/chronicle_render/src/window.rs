//! Window backend contract and the headless backend.

use std::collections::VecDeque;

use chronicle_core::{InputEvent, Size};

use crate::command::DrawCommand;

/// The external window/GPU collaborator.
///
/// The engine only needs event polling (non-blocking), presentation of a
/// committed command list, and open/close/size control. Real backends wrap
/// a platform window; tests and the demo use [`HeadlessWindow`].
pub trait WindowBackend {
    /// Returns true while the window is open.
    fn is_open(&self) -> bool;

    /// Closes the window. The frame loop exits at the top of the next
    /// iteration.
    fn close(&mut self);

    /// Returns the window size in pixels.
    fn size(&self) -> Size;

    /// Resizes the window.
    fn resize(&mut self, size: Size);

    /// Returns the next pending input event, or `None` when the current
    /// frame's events are drained. Never blocks.
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Displays a committed frame.
    fn present(&mut self, commands: &[DrawCommand]);
}

/// Scriptable window backend without a display.
///
/// Events are staged in per-frame batches: each drain-until-`None` cycle
/// consumes one batch, so a script of N batches feeds N loop iterations.
/// Presented frames are captured for inspection.
#[derive(Debug)]
pub struct HeadlessWindow {
    open: bool,
    size: Size,
    pending: VecDeque<InputEvent>,
    script: VecDeque<Vec<InputEvent>>,
    frames: Vec<Vec<DrawCommand>>,
    presented: usize,
}

/// Captured frames kept by a [`HeadlessWindow`]; older ones are dropped.
const FRAME_CAPTURE_LIMIT: usize = 256;

impl HeadlessWindow {
    /// Opens a headless window with no scripted input.
    #[must_use]
    pub fn open(size: Size) -> Self {
        Self {
            open: true,
            size,
            pending: VecDeque::new(),
            script: VecDeque::new(),
            frames: Vec::new(),
            presented: 0,
        }
    }

    /// Opens a headless window that plays back the given event batches,
    /// one batch per frame, starting with the first frame.
    #[must_use]
    pub fn with_script(size: Size, script: Vec<Vec<InputEvent>>) -> Self {
        let mut window = Self::open(size);
        let mut batches: VecDeque<Vec<InputEvent>> = script.into_iter().collect();
        if let Some(first) = batches.pop_front() {
            window.pending = first.into();
        }
        window.script = batches;
        window
    }

    /// Queues events for the current frame.
    pub fn push_events(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.pending.extend(events);
    }

    /// Returns the captured frames, oldest first (bounded; the oldest are
    /// dropped past the capture limit).
    #[must_use]
    pub fn frames(&self) -> &[Vec<DrawCommand>] {
        &self.frames
    }

    /// Returns how many frames were presented over the window's lifetime.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.presented
    }
}

impl WindowBackend for HeadlessWindow {
    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        // Batch drained: stage the next frame's batch for the next drain
        // cycle and report this frame as quiet.
        if let Some(next) = self.script.pop_front() {
            self.pending = next.into();
        }
        None
    }

    fn present(&mut self, commands: &[DrawCommand]) {
        if self.frames.len() == FRAME_CAPTURE_LIMIT {
            self.frames.remove(0);
        }
        self.frames.push(commands.to_vec());
        self.presented += 1;
    }
}
