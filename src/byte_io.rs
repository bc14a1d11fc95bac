//! Byte channel conventions for `,` and `.`.

use std::io::{self, ErrorKind, Read, Write};

const CARRIAGE_RETURN: u8 = b'\r';

/// Single-byte access to the caller's input and output channels.
pub struct ByteIo<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> ByteIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read the next input byte for `,`.
    ///
    /// Carriage returns are skipped so CR+LF input behaves like LF. An
    /// exhausted channel reads as 0.
    pub fn read_byte(&mut self) -> io::Result<u8> {
        loop {
            match self.next_raw()? {
                Some(CARRIAGE_RETURN) => continue,
                Some(byte) => return Ok(byte),
                None => return Ok(0),
            }
        }
    }

    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn next_raw(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn adapter(input: &[u8]) -> ByteIo<Cursor<Vec<u8>>, Vec<u8>> {
        ByteIo::new(Cursor::new(input.to_vec()), Vec::new())
    }

    #[test]
    fn reads_bytes_in_order_then_zero_on_eof() {
        let mut io = adapter(b"ab");
        assert_eq!(io.read_byte().unwrap(), b'a');
        assert_eq!(io.read_byte().unwrap(), b'b');
        assert_eq!(io.read_byte().unwrap(), 0);
        assert_eq!(io.read_byte().unwrap(), 0);
    }

    #[test]
    fn carriage_returns_are_skipped() {
        let mut io = adapter(b"\r\r\nx\r");
        assert_eq!(io.read_byte().unwrap(), b'\n');
        assert_eq!(io.read_byte().unwrap(), b'x');
        // Trailing CR runs into end of stream.
        assert_eq!(io.read_byte().unwrap(), 0);
    }

    #[test]
    fn high_bytes_pass_through() {
        let mut io = adapter(&[0xff, 0x80]);
        assert_eq!(io.read_byte().unwrap(), 0xff);
        assert_eq!(io.read_byte().unwrap(), 0x80);
    }

    #[test]
    fn writes_raw_bytes() {
        let mut io = adapter(b"");
        io.write_byte(b'H').unwrap();
        io.write_byte(0).unwrap();
        io.write_byte(0xfe).unwrap();
        io.flush().unwrap();
        let (_, out) = io.into_inner();
        assert_eq!(out, vec![b'H', 0, 0xfe]);
    }

    struct Flaky {
        interrupted: bool,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            buf[0] = b'k';
            Ok(1)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("channel gone"))
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let mut io = ByteIo::new(Flaky { interrupted: false }, io::sink());
        assert_eq!(io.read_byte().unwrap(), b'k');
    }

    #[test]
    fn transport_errors_propagate() {
        let mut io = ByteIo::new(Broken, io::sink());
        assert!(io.read_byte().is_err());
    }
}
