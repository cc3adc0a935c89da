//! Resolution of the merged buffer stack a buffer belongs to.

use grep_filter_host::{BufferInfo, BufferRef, Host};

/// Full names of every buffer sharing one display slot, in host list order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergedBuffers(Vec<String>);

impl MergedBuffers {
    /// Collect the merged stack containing `buffer`.
    ///
    /// Walks the host list from the first buffer carrying `buffer`'s number and
    /// stops at the first buffer with a different number. An unknown reference
    /// gives an empty stack.
    pub fn resolve<H: Host + ?Sized>(host: &H, buffer: BufferRef) -> Self {
        let Some(target) = host.buffer(buffer) else {
            log::debug!("merged buffers: unknown buffer {buffer}");
            return Self::default();
        };
        Self::from_list(&host.buffers(), target.number)
    }

    fn from_list(buffers: &[BufferInfo], number: u32) -> Self {
        let names = buffers
            .iter()
            .skip_while(|buffer| buffer.number != number)
            .take_while(|buffer| buffer.number == number)
            .map(|buffer| buffer.full_name.clone())
            .collect();
        Self(names)
    }

    /// Names joined with `,`, as used in buffer masks and filter names.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
