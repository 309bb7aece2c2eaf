//! Loop frames for the interpreter.

/// One active loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopFrame {
    pub loop_node_id: String,
    pub iterations: u32,
    /// 1-based; the first pass through the body is iteration 1.
    pub current_iteration: u32,
    pub body_entry_node_id: String,
}

/// Active loops, innermost last, keyed by loop node id.
///
/// A loop is identified by its node being revisited, not by a call: the
/// body's last edge points back at the loop node.
#[derive(Debug, Clone, Default)]
pub struct LoopStack {
    frames: Vec<LoopFrame>,
}

impl LoopStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: LoopFrame) {
        self.frames.push(frame);
    }

    pub fn find_mut(&mut self, loop_node_id: &str) -> Option<&mut LoopFrame> {
        self.frames
            .iter_mut()
            .find(|f| f.loop_node_id == loop_node_id)
    }

    /// Remove the frame for `loop_node_id`, wherever it sits.
    pub fn remove(&mut self, loop_node_id: &str) -> Option<LoopFrame> {
        let at = self
            .frames
            .iter()
            .position(|f| f.loop_node_id == loop_node_id)?;
        Some(self.frames.remove(at))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(id: &str) -> LoopFrame {
        LoopFrame {
            loop_node_id: id.to_string(),
            iterations: 2,
            current_iteration: 1,
            body_entry_node_id: format!("{id}-body"),
        }
    }

    #[test]
    fn test_remove_takes_frame_below_top() {
        let mut stack = LoopStack::new();
        stack.push(frame("outer"));
        stack.push(frame("inner"));

        let removed = stack.remove("outer").unwrap();
        assert_eq!(removed.loop_node_id, "outer");
        assert_eq!(stack.depth(), 1);
        assert!(stack.find_mut("inner").is_some());
        assert!(stack.find_mut("outer").is_none());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut stack = LoopStack::new();
        stack.push(frame("l"));
        assert_eq!(stack.remove("ghost"), None);
        assert_eq!(stack.depth(), 1);
    }
}
