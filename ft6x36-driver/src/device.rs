use embedded_hal::i2c::{self, SevenBitAddress};

device_driver::create_device! {
  device_name: Device,
  dsl: {
    config {
      type RegisterAddressType = u8;
    }
    /// Device mode. Only the low two bits carry the working/factory mode.
    register DeviceMode {
      type Access = RO;
      const ADDRESS = 0x00;
      const SIZE_BITS = 8;
      value: uint = 0..2,
    },
    /// Raw gesture id as reported by the firmware.
    /// Not every panel firmware implements gestures; see [`crate::Gesture`].
    register GestureId {
      type Access = RO;
      const ADDRESS = 0x01;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Number of touch points currently reported.
    /// The low nibble holds the count, zero to two.
    register TouchStatus {
      type Access = RO;
      const ADDRESS = 0x02;
      const SIZE_BITS = 8;
      value: uint = 0..4,
    },
    /// Touch detection threshold. Lower is more sensitive.
    register Threshold {
      const ADDRESS = 0x80;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Time without touch before switching from active to monitor mode.
    /// Unit: 1s
    register MonitorTime {
      const ADDRESS = 0x87;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Report rate in active mode.
    /// Should not be set below 12.
    register PeriodActive {
      type Access = RO;
      const ADDRESS = 0x88;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Report rate in monitor mode.
    /// Should not be set below 30.
    register PeriodMonitor {
      type Access = RO;
      const ADDRESS = 0x89;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Firmware library version.
    /// Read as one 16 bit big endian word spanning the high (0xA1) and
    /// low (0xA2) registers.
    register LibVersion {
      type Access = RO;
      type ByteOrder = BE;
      const ADDRESS = 0xA1;
      const SIZE_BITS = 16;
      value: uint = 0..16,
    },
    /// Chip id. Known values are listed in [`crate::Model`].
    register ChipId {
      type Access = RO;
      const ADDRESS = 0xA3;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Interrupt mode (the datasheet calls this G_MODE).
    /// The values observed on real parts are the inverse of the datasheet:
    /// 0 pulses on every touch, 1 only pulses when a scan cycle sees a touch.
    register InterruptMode {
      const ADDRESS = 0xA4;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Power mode, see [`crate::PowerMode`].
    /// Deep sleep can only be left through a hardware reset.
    register PowerMode {
      const ADDRESS = 0xA5;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Firmware Version Register
    register FirmwareVersion {
      type Access = RO;
      const ADDRESS = 0xA6;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Vendor (panel) id. FocalTech parts report `0x11`.
    register VendorId {
      type Access = RO;
      const ADDRESS = 0xA8;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
    /// Error status of the touch firmware
    register ErrorStatus {
      type Access = RO;
      const ADDRESS = 0xA9;
      const SIZE_BITS = 8;
      value: uint = 0..8,
    },
  }
}

/// First register of the touch report burst.
pub(crate) const TOUCH_REPORT_ADDRESS: u8 = 0x00;

pub(crate) struct DeviceInterface<I2C> {
    device_address: SevenBitAddress,
    i2c: I2C,
}

impl<I2C> DeviceInterface<I2C> {
    pub(crate) const fn new(i2c: I2C, device_address: SevenBitAddress) -> Self {
        Self {
            i2c,
            device_address,
        }
    }
}

impl<BUS: i2c::I2c> DeviceInterface<BUS> {
    /// Burst read of `data.len()` consecutive registers starting at `address`.
    pub(crate) fn read_block(
        &mut self,
        address: u8,
        data: &mut [u8],
    ) -> Result<(), DeviceError<BUS::Error>> {
        self.i2c.write_read(self.device_address, &[address], data)?;
        Ok(())
    }
}

impl<BUS: i2c::I2c> device_driver::RegisterInterface for DeviceInterface<BUS> {
    type Error = DeviceError<BUS::Error>;

    type AddressType = u8;

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut frame = [0u8; 3];
        debug_assert!(data.len() < frame.len());
        let len = data.len().min(frame.len() - 1);
        frame[0] = address;
        frame[1..=len].copy_from_slice(&data[..len]);
        self.i2c.write(self.device_address, &frame[..=len])?;
        Ok(())
    }

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.read_block(address, data)
    }
}

/// Low level interface error that wraps the I2C error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct DeviceError<I2c>(pub I2c);

impl<I2c> From<I2c> for DeviceError<I2c> {
    fn from(value: I2c) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use device_driver::RegisterInterface;
    use embedded_hal_mock::eh1::i2c;

    #[test]
    fn read_chip_id() {
        let mut i2c_device =
            i2c::Mock::new(&[i2c::Transaction::write_read(0x38, vec![0xA3], vec![0x64])]);
        let mut ft = Device::new(DeviceInterface::new(&mut i2c_device, 0x38));

        let chip_id = ft.chip_id().read().unwrap().value();

        assert_eq!(chip_id, 0x64);

        i2c_device.done();
    }

    #[test]
    fn read_lib_version_big_endian() {
        let mut i2c_device = i2c::Mock::new(&[i2c::Transaction::write_read(
            0x38,
            vec![0xA1],
            vec![0x30, 0x03],
        )]);
        let mut ft = Device::new(DeviceInterface::new(&mut i2c_device, 0x38));

        let version = ft.lib_version().read().unwrap().value();

        assert_eq!(version, 0x3003);

        i2c_device.done();
    }

    #[test]
    fn device_mode_is_masked_to_two_bits() {
        let mut i2c_device =
            i2c::Mock::new(&[i2c::Transaction::write_read(0x38, vec![0x00], vec![0xFD])]);
        let mut ft = Device::new(DeviceInterface::new(&mut i2c_device, 0x38));

        let mode = ft.device_mode().read().unwrap().value();

        assert_eq!(mode, 0x01);

        i2c_device.done();
    }

    #[test]
    fn write_threshold() {
        let mut i2c_device =
            i2c::Mock::new(&[i2c::Transaction::write(0x38, vec![0x80, 60])]);
        let mut ft = Device::new(DeviceInterface::new(&mut i2c_device, 0x38));

        ft.threshold().write(|w| w.set_value(60)).unwrap();

        i2c_device.done();
    }

    #[test]
    fn read_block_spans_registers() {
        let mut i2c_device = i2c::Mock::new(&[i2c::Transaction::write_read(
            0x38,
            vec![0x03],
            vec![0x81, 0x23, 0x04, 0x56],
        )]);
        let mut interface = DeviceInterface::new(&mut i2c_device, 0x38);
        let mut buf = [0u8; 4];

        interface.read_block(0x03, &mut buf).unwrap();

        assert_eq!(buf, [0x81, 0x23, 0x04, 0x56]);

        i2c_device.done();
    }

    #[test]
    fn write_register_frames_register_and_payload() {
        let mut i2c_device =
            i2c::Mock::new(&[i2c::Transaction::write(0x38, vec![0xA1, 0x12, 0x34])]);
        let mut interface = DeviceInterface::new(&mut i2c_device, 0x38);

        interface.write_register(0xA1, 16, &[0x12, 0x34]).unwrap();

        i2c_device.done();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn write_register_rejects_oversized_payload() {
        let mut i2c_device = i2c::Mock::new(&[]);
        let mut interface = DeviceInterface::new(&mut i2c_device, 0x38);

        let _ = interface.write_register(0xA1, 24, &[0x12, 0x34, 0x56]);
    }
}
