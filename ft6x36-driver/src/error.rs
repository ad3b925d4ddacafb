use embedded_hal::digital;

use crate::device::DeviceError;

/// Driver error, generic over the I2C bus error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// A register transfer failed.
    #[error("I2C bus error")]
    Bus(E),
    /// The reset or interrupt line could not be driven or read.
    #[error("GPIO error: {0:?}")]
    Pin(digital::ErrorKind),
    /// The vendor id register did not hold the FocalTech id.
    #[error("unexpected vendor id {found:#04x}")]
    VendorMismatch { found: u8 },
    /// The chip id is not one of the supported models.
    #[error("unsupported chip id {found:#04x}")]
    ChipIdMismatch { found: u8 },
    /// The device has not been successfully initialized.
    #[error("device not initialized")]
    NotInitialized,
}

impl<E> From<DeviceError<E>> for Error<E> {
    fn from(value: DeviceError<E>) -> Self {
        Error::Bus(value.0)
    }
}

impl<E> Error<E> {
    pub(crate) fn pin(err: impl digital::Error) -> Self {
        Error::Pin(err.kind())
    }
}
