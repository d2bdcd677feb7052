use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use byteorder::{ByteOrder, NativeEndian, WriteBytesExt};

/// Read a headerless band file as native-endian f32 samples.
pub fn read_f32_file(path: &Path) -> io::Result<Vec<f32>> {
    let bytes = fs::read(path)?;
    let width = std::mem::size_of::<f32>();
    if bytes.len() % width != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{} bytes is not a whole number of f32 samples",
                bytes.len()
            ),
        ));
    }

    let mut samples = vec![0f32; bytes.len() / width];
    NativeEndian::read_f32_into(&bytes, &mut samples);
    Ok(samples)
}

/// Write f32 samples in iteration order, native-endian, no header.
pub fn write_f32_file<'a, I>(path: &Path, samples: I) -> io::Result<()>
where
    I: IntoIterator<Item = &'a f32>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    for &v in samples {
        writer.write_f32::<NativeEndian>(v)?;
    }
    writer.flush()
}
