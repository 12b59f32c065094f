use std::io::Stdout;

use pbr::{ProgressBar, Units};

/// Writer that feeds a progress bar with everything passed through it.
pub struct ProgressWriter<T> {
    bar: ProgressBar<Stdout>,
    inner: T,
}

impl<T> ProgressWriter<T>
where
    T: std::io::Write,
{
    pub fn new(total_bytes: u64, inner: T) -> Self {
        let mut bar = ProgressBar::new(total_bytes);
        bar.set_units(Units::Bytes);

        Self { bar, inner }
    }

    pub fn finish(&mut self) {
        self.bar.finish();
    }
}

impl<T> std::io::Write for ProgressWriter<T>
where
    T: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.bar.add(written as _);
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
