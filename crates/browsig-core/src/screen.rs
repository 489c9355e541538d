use crate::{host::Host, record::ScreenRecord};

/// Synchronous extraction of display attributes.
pub struct ScreenReader;

impl ScreenReader {
    pub fn read<H: Host + ?Sized>(host: &H) -> ScreenRecord {
        host.screen()
    }
}
