/// Location of a single file in the sandbox arena
#[derive(Debug, Clone, Copy)]
pub struct FileEntry {
    /// Byte offset into the arena
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
}
