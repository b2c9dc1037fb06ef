use std::io;

/// Consumer of decoded samples, fed in reconstruction order.
///
/// The byte side of every codec is a plain [`io::Write`].
pub trait ValueSink {
    fn push(&mut self, value: u16) -> io::Result<()>;
}

impl ValueSink for Vec<u16> {
    #[inline(always)]
    fn push(&mut self, value: u16) -> io::Result<()> {
        Vec::push(self, value);
        Ok(())
    }
}

impl<S: ValueSink + ?Sized> ValueSink for &mut S {
    #[inline(always)]
    fn push(&mut self, value: u16) -> io::Result<()> {
        (**self).push(value)
    }
}

/// Adapts a closure into a [`ValueSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(u16)> ValueSink for FnSink<F> {
    #[inline(always)]
    fn push(&mut self, value: u16) -> io::Result<()> {
        (self.0)(value);
        Ok(())
    }
}

/// Writes every value to the inner writer as a big-endian pair.
pub struct BeSink<W> {
    writer: W,
}

impl<W: io::Write> BeSink<W> {
    pub fn new(writer: W) -> Self {
        BeSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> ValueSink for BeSink<W> {
    fn push(&mut self, value: u16) -> io::Result<()> {
        self.writer.write_all(&value.to_be_bytes())
    }
}
