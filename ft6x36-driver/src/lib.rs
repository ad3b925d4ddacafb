//! Driver for the FocalTech FT6x36 family of capacitive touch controllers
//! (FT6206, FT6236, FT6236U and FT3267).
//!
//! The driver is `embedded-hal` 1.0 based and blocking. It owns the I2C bus,
//! the reset line and, optionally, the interrupt line. Whether a touch is
//! present is detected either through the interrupt line or through the touch
//! status register, chosen once with [`TouchDetect`].
//!
//! ```rust,ignore
//! let mut touch = Ft6x36::new(i2c, DEFAULT_ADDRESS, TouchDetect::InterruptPin(int_pin), rst_pin);
//! touch.reset(&mut delay)?;
//! let identity = touch.initialize()?;
//!
//! loop {
//!     if touch.is_pressed()? {
//!         let report = touch.touch_report()?;
//!         for point in report.points() {
//!             // ...
//!         }
//!     }
//! }
//! ```
#![cfg_attr(not(test), no_std)]

use core::convert::Infallible;

use embedded_hal::{
    delay::DelayNs,
    digital::{self, InputPin, OutputPin},
    i2c::{I2c, SevenBitAddress},
};

#[macro_use]
mod fmt;

mod device;
mod error;
mod gesture;
mod touch;

use device::{Device, DeviceInterface, TOUCH_REPORT_ADDRESS};
pub use error::Error;
pub use gesture::Gesture;
pub use touch::{EventFlag, TouchPoint, TouchReport, MAX_TOUCH_POINTS, REPORT_SIZE};

/// Default 7 bit I2C address of the FT6x36 family.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x38;

/// Sensitivity threshold written on every [`Ft6x36::initialize`].
pub const DEFAULT_THRESHOLD: u8 = 60;

/// Vendor id reported by FocalTech parts.
pub const FOCALTECH_VENDOR_ID: u8 = 0x11;

const RESET_HIGH_MS: u32 = 10;
const RESET_LOW_MS: u32 = 30;
const RESET_SETTLE_MS: u32 = 5;

/// Supported controller models, keyed by chip id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Model {
    Ft6206,
    Ft6236,
    Ft6236U,
    Ft3267,
    Unknown,
}

impl Model {
    pub const FT6206_CHIP_ID: u8 = 0x06;
    pub const FT6236_CHIP_ID: u8 = 0x36;
    pub const FT6236U_CHIP_ID: u8 = 0x64;
    pub const FT3267_CHIP_ID: u8 = 0x33;

    pub const fn from_chip_id(chip_id: u8) -> Self {
        match chip_id {
            Self::FT6206_CHIP_ID => Model::Ft6206,
            Self::FT6236_CHIP_ID => Model::Ft6236,
            Self::FT6236U_CHIP_ID => Model::Ft6236U,
            Self::FT3267_CHIP_ID => Model::Ft3267,
            _ => Model::Unknown,
        }
    }

    /// Whether `chip_id` belongs to a supported part.
    pub const fn is_supported(chip_id: u8) -> bool {
        matches!(
            chip_id,
            Self::FT6206_CHIP_ID
                | Self::FT6236_CHIP_ID
                | Self::FT6236U_CHIP_ID
                | Self::FT3267_CHIP_ID
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Model::Ft6206 => "FT6206",
            Model::Ft6236 => "FT6236",
            Model::Ft6236U => "FT6236U",
            Model::Ft3267 => "FT3267",
            Model::Unknown => "UNKNOWN",
        }
    }
}

/// Identity of a validated controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct DeviceIdentity {
    pub vendor_id: u8,
    /// Raw chip id register. The register is 8 bits wide, so the id is kept
    /// at that width rather than widened.
    pub chip_id: u8,
    pub model: Model,
}

/// Power modes of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum PowerMode {
    /// ~4mA
    Active = 0,
    /// ~3mA
    Monitor = 1,
    /// ~100uA. Only a hardware reset wakes the chip up again.
    DeepSleep = 3,
}

/// Interrupt line behaviour.
///
/// The register values are the inverse of what the datasheet documents; the
/// values here are the ones the hardware actually honours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum InterruptMode {
    /// Pulse the interrupt line whenever a touch is detected.
    Trigger = 0,
    /// Only pulse when a touch is seen during a scan cycle.
    Polling = 1,
}

/// How [`Ft6x36::is_pressed`] detects a touch.
pub enum TouchDetect<INT> {
    /// The interrupt line is held low while the panel is touched.
    InterruptPin(INT),
    /// Poll the touch status register.
    StatusRegister,
}

impl TouchDetect<NoInterruptPin> {
    /// Status register polling for boards without an interrupt line.
    pub const fn status_register() -> Self {
        TouchDetect::StatusRegister
    }
}

/// Placeholder pin type for [`TouchDetect::StatusRegister`].
pub struct NoInterruptPin;

impl digital::ErrorType for NoInterruptPin {
    type Error = Infallible;
}

impl InputPin for NoInterruptPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

pub struct Ft6x36<I2C, INT, RST> {
    i2c: I2C,
    address: SevenBitAddress,
    detect: TouchDetect<INT>,
    reset_pin: RST,
    identity: Option<DeviceIdentity>,
}

impl<I2C, INT, RST> Ft6x36<I2C, INT, RST>
where
    I2C: I2c,
    INT: InputPin,
    RST: OutputPin,
{
    pub fn new(
        i2c: I2C,
        address: SevenBitAddress,
        detect: TouchDetect<INT>,
        reset_pin: RST,
    ) -> Self {
        Self {
            i2c,
            address,
            detect,
            reset_pin,
            identity: None,
        }
    }

    /// Give back the bus and the pins.
    pub fn release(self) -> (I2C, TouchDetect<INT>, RST) {
        (self.i2c, self.detect, self.reset_pin)
    }

    fn device(&mut self) -> Device<DeviceInterface<&mut I2C>> {
        Device::new(DeviceInterface::new(&mut self.i2c, self.address))
    }

    fn initialized(&self) -> Result<DeviceIdentity, Error<I2C::Error>> {
        self.identity.ok_or(Error::NotInitialized)
    }

    /// Validate the chip and apply the default threshold.
    ///
    /// The threshold is written before validation, on every call. A failed
    /// call leaves the driver uninitialized.
    pub fn initialize(&mut self) -> Result<DeviceIdentity, Error<I2C::Error>> {
        self.identity = None;

        let mut device = self.device();
        let vendor_id = device.vendor_id().read()?.value();
        let chip_id = device.chip_id().read()?.value();
        let firmware = device.firmware_version().read()?.value();
        let rate = device.period_active().read()?.value();
        let threshold = device.threshold().read()?.value();
        info!("Vendor id: {:#x}", vendor_id);
        info!("Chip id: {:#x}", chip_id);
        info!("Firmware version: {:#x}", firmware);
        info!("Point rate: {} Hz", rate);
        info!("Threshold: {}", threshold);

        device
            .threshold()
            .write(|w| w.set_value(DEFAULT_THRESHOLD))?;

        if vendor_id != FOCALTECH_VENDOR_ID {
            error!("Vendor id {:#x} does not match", vendor_id);
            return Err(Error::VendorMismatch { found: vendor_id });
        }
        if !Model::is_supported(chip_id) {
            error!("Chip id {:#x} is not supported", chip_id);
            return Err(Error::ChipIdMismatch { found: chip_id });
        }

        let library = device.lib_version().read()?.value();
        info!("Library version: {:#x}", library);
        let monitor_period = device.period_monitor().read()?.value();
        info!("Monitor period: {:#x}", monitor_period);

        let identity = DeviceIdentity {
            vendor_id,
            chip_id,
            model: Model::from_chip_id(chip_id),
        };
        self.identity = Some(identity);
        Ok(identity)
    }

    /// Identity stored by the last successful [`Ft6x36::initialize`].
    pub fn identity(&self) -> Option<DeviceIdentity> {
        self.identity
    }

    pub fn model(&self) -> Option<Model> {
        self.identity.map(|identity| identity.model)
    }

    /// Read and decode one touch report.
    pub fn touch_report(&mut self) -> Result<TouchReport, Error<I2C::Error>> {
        self.initialized()?;
        let mut buf = [0u8; REPORT_SIZE];
        DeviceInterface::new(&mut self.i2c, self.address)
            .read_block(TOUCH_REPORT_ADDRESS, &mut buf)?;
        Ok(TouchReport::decode(&buf))
    }

    /// Read the current touch points into `points`, returning the number of
    /// contacts reported. Points beyond `points.len()` are dropped.
    pub fn read_points(&mut self, points: &mut [TouchPoint]) -> Result<u8, Error<I2C::Error>> {
        let report = self.touch_report()?;
        Ok(report.copy_points(points))
    }

    pub fn gesture(&mut self) -> Result<Gesture, Error<I2C::Error>> {
        self.initialized()?;
        let raw = self.device().gesture_id().read()?.value();
        Ok(Gesture::from_raw(raw))
    }

    /// Whether the panel is currently touched.
    pub fn is_pressed(&mut self) -> Result<bool, Error<I2C::Error>> {
        match &mut self.detect {
            TouchDetect::InterruptPin(pin) => pin.is_low().map_err(Error::pin),
            TouchDetect::StatusRegister => {
                self.initialized()?;
                let count = self.device().touch_status().read()?.value();
                Ok(count != 0)
            }
        }
    }

    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Error<I2C::Error>> {
        self.initialized()?;
        self.device()
            .power_mode()
            .write(|w| w.set_value(mode as u8))?;
        Ok(())
    }

    /// Enter deep sleep. Use [`Ft6x36::wakeup`] to leave it.
    pub fn sleep(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_power_mode(PowerMode::DeepSleep)
    }

    /// Wake the chip from any power mode through a hardware reset.
    pub fn wakeup(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<I2C::Error>> {
        self.reset(delay)
    }

    /// Hardware reset through the reset line.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<I2C::Error>> {
        self.reset_pin.set_high().map_err(Error::pin)?;
        delay.delay_ms(RESET_HIGH_MS);
        self.reset_pin.set_low().map_err(Error::pin)?;
        delay.delay_ms(RESET_LOW_MS);
        self.reset_pin.set_high().map_err(Error::pin)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Device mode, the low two bits of the mode register.
    pub fn device_mode(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.initialized()?;
        Ok(self.device().device_mode().read()?.value())
    }

    pub fn threshold(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.initialized()?;
        Ok(self.device().threshold().read()?.value())
    }

    /// Set the touch threshold. Lower values are more sensitive.
    pub fn set_threshold(&mut self, value: u8) -> Result<(), Error<I2C::Error>> {
        self.initialized()?;
        self.device().threshold().write(|w| w.set_value(value))?;
        Ok(())
    }

    /// Seconds without touch before the chip drops into monitor mode.
    pub fn monitor_time(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.initialized()?;
        Ok(self.device().monitor_time().read()?.value())
    }

    pub fn set_monitor_time(&mut self, seconds: u8) -> Result<(), Error<I2C::Error>> {
        self.initialized()?;
        self.device().monitor_time().write(|w| w.set_value(seconds))?;
        Ok(())
    }

    pub fn library_version(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.initialized()?;
        Ok(self.device().lib_version().read()?.value())
    }

    pub fn set_interrupt_mode(&mut self, mode: InterruptMode) -> Result<(), Error<I2C::Error>> {
        self.initialized()?;
        self.device()
            .interrupt_mode()
            .write(|w| w.set_value(mode as u8))?;
        Ok(())
    }

    /// Only raise the interrupt when a scan cycle sees a touch.
    pub fn interrupt_polling(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_interrupt_mode(InterruptMode::Polling)
    }

    /// Raise the interrupt on every detected touch.
    pub fn interrupt_trigger(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_interrupt_mode(InterruptMode::Trigger)
    }

    pub fn chip_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.initialized()?;
        Ok(self.device().chip_id().read()?.value())
    }

    pub fn vendor_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.initialized()?;
        Ok(self.device().vendor_id().read()?.value())
    }

    pub fn error_code(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.initialized()?;
        Ok(self.device().error_status().read()?.value())
    }
}
