use super::WindowError;

/// What the render loop needs from a window.
pub trait FrameTarget {
    /// Set once the user asked to close the window.
    fn should_close(&self) -> bool;
    /// Drains pending window events without blocking.
    fn poll_events(&mut self);
    fn swap_buffers(&mut self) -> Result<(), WindowError>;
    /// Drawable size in physical pixels.
    fn drawable_size(&self) -> (u32, u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub index: u64,
    pub size: (u32, u32),
}

/// Draws frames until the target reports it should close. Returns the
/// number of frames presented.
pub fn run_until_closed<T, F>(target: &mut T, mut draw: F) -> Result<u64, WindowError>
where
    T: FrameTarget + ?Sized,
    F: FnMut(Frame),
{
    let mut index = 0;
    while !target.should_close() {
        draw(Frame {
            index,
            size: target.drawable_size(),
        });
        target.swap_buffers()?;
        target.poll_events();
        index += 1;
    }
    Ok(index)
}
