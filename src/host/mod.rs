//! Host environment abstraction.
//!
//! The host owns every modal experience the capture screen delegates to:
//! permission prompts, the camera, the crop tool and the display surface.
//! Launching an experience only opens it; its outcome comes back later as a
//! [`HostEvent`] pulled through [`Host::next_event`].

pub mod desktop;
pub mod mock;
mod types;

pub use desktop::{DesktopHost, Prompter, TerminalPrompter};
pub use types::{
    CROP_OUTPUT_SIZE, Capability, CapturedImage, CropRequest, CroppedImage, HostEvent, Notice,
};

use crate::error::Result;

/// Core host operations trait.
///
/// Implemented by [`DesktopHost`] for the CLI and by
/// [`mock::MockHost`] for tests.
///
/// # Implementation Notes
///
/// - `launch_*` and `request_permission` must not block on the user; they
///   queue the eventual outcome for `next_event`
/// - Returning an error from `launch_*` means the experience is not
///   available on this host
pub trait Host {
    /// Whether a capability is currently granted.
    fn has_permission(&self, capability: Capability) -> bool;

    /// Ask the user for a capability.
    fn request_permission(&mut self, capability: Capability) -> Result<()>;

    /// Open the camera experience.
    fn launch_capture(&mut self) -> Result<()>;

    /// Open the crop experience on a stored capture.
    fn launch_crop(&mut self, request: &CropRequest) -> Result<()>;

    /// Show a transient notification.
    fn notify(&mut self, notice: Notice);

    /// Put a bitmap on the display surface.
    fn render(&mut self, image: &CroppedImage);

    /// Close the screen.
    fn finish(&mut self);

    /// Next pending callback, if any.
    fn next_event(&mut self) -> Option<HostEvent>;
}

/// Type alias for boxed trait object.
pub type BoxedHost = Box<dyn Host>;

impl<H: Host + ?Sized> Host for Box<H> {
    fn has_permission(&self, capability: Capability) -> bool {
        (**self).has_permission(capability)
    }

    fn request_permission(&mut self, capability: Capability) -> Result<()> {
        (**self).request_permission(capability)
    }

    fn launch_capture(&mut self) -> Result<()> {
        (**self).launch_capture()
    }

    fn launch_crop(&mut self, request: &CropRequest) -> Result<()> {
        (**self).launch_crop(request)
    }

    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }

    fn render(&mut self, image: &CroppedImage) {
        (**self).render(image);
    }

    fn finish(&mut self) {
        (**self).finish();
    }

    fn next_event(&mut self) -> Option<HostEvent> {
        (**self).next_event()
    }
}
