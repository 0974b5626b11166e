//! I2C bus abstractions
//!
//! The Trill command protocol is defined in terms of how many bytes a
//! transfer actually moved, so the bus trait reports byte counts instead of
//! collapsing every transfer into success or failure.

/// I2C bus master
///
/// Both operations block until the transfer is complete and return the
/// number of bytes moved. A count smaller than the buffer is a short
/// transfer, not an error at this layer.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(address, buf)
    }
}

/// Adapter from a blocking `embedded-hal` 1.0 I2C master
///
/// `embedded-hal` transfers are all-or-nothing, so a successful call
/// reports the full buffer length.
#[derive(Debug)]
pub struct EmbeddedHalBus<I> {
    inner: I,
}

impl<I> EmbeddedHalBus<I> {
    /// Wrap an `embedded-hal` I2C master
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped bus
    pub fn inner(&mut self) -> &mut I {
        &mut self.inner
    }

    /// Release the wrapped bus
    pub fn release(self) -> I {
        self.inner
    }
}

impl<I> I2cBus for EmbeddedHalBus<I>
where
    I: embedded_hal::i2c::I2c,
{
    type Error = I::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error> {
        self.inner.write(address, data)?;
        Ok(data.len())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.read(address, buf)?;
        Ok(buf.len())
    }
}
