use crate::backend::Backend;
use crate::overlay::Overlay;
use crate::rewrite::SpecRedirects;

/// The site's file tree: its own content first, then the Go distribution
/// with the spec and memory model paths rewritten.
pub fn site_fs(content: impl Backend + 'static, goroot: impl Backend + 'static) -> Overlay {
    site_fs_layered(content, Vec::new(), goroot)
}

/// Like [`site_fs`], with extra layers between the content and GOROOT,
/// highest priority first.
pub fn site_fs_layered(
    content: impl Backend + 'static,
    middle: Vec<Box<dyn Backend>>,
    goroot: impl Backend + 'static,
) -> Overlay {
    let mut layers: Vec<Box<dyn Backend>> = Vec::with_capacity(middle.len() + 2);
    layers.push(Box::new(content));
    layers.extend(middle);
    layers.push(Box::new(SpecRedirects::new(goroot)));
    Overlay::new(layers)
}
