use std::io::{self, Read, Seek, SeekFrom};

/// Convert array slice to hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Reads up to `max_len` bytes starting at `offset`.
/// Keeps reading across short reads until the buffer is full or the source
/// hits end of file, so the returned length is only short at EOF.
pub fn read_upto<R: Read + Seek>(source: &mut R, offset: u64, max_len: usize) -> io::Result<Vec<u8>> {
    // Move the cursor to the start byte
    source.seek(SeekFrom::Start(offset))?;

    let mut buffer = vec![0u8; max_len];
    let mut filled = 0;
    while filled < max_len {
        match source.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    buffer.truncate(filled);

    Ok(buffer)
}

/// Size of a seekable source without reading it, restoring the cursor to the start.
pub fn stream_len<S: Seek>(source: &mut S) -> io::Result<u64> {
    let size = source.seek(SeekFrom::End(0))?;
    source.seek(SeekFrom::Start(0))?;
    Ok(size)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    /// Hands out at most three bytes per `read` call.
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(3);
            self.0.read(&mut buf[..len])
        }
    }

    impl Seek for Trickle {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.0.seek(pos)
        }
    }

    #[test]
    fn hex_encoding() {
        assert_eq!(bytes_to_hex(&[0x00, 0x0f, 0xa5, 0xff]), "000fa5ff");
    }

    #[test]
    fn read_upto_fills_across_short_reads() {
        let mut source = Trickle(Cursor::new((0u8..100).collect()));
        let chunk = read_upto(&mut source, 10, 20).unwrap();
        assert_eq!(chunk, (10u8..30).collect::<Vec<_>>());
    }

    #[test]
    fn read_upto_stops_at_eof() {
        let mut source = Cursor::new(vec![7u8; 25]);
        assert_eq!(read_upto(&mut source, 20, 10).unwrap().len(), 5);
        assert!(read_upto(&mut source, 40, 10).unwrap().is_empty());
    }

    #[test]
    fn stream_len_rewinds() {
        let mut source = Cursor::new(vec![1u8; 42]);
        assert_eq!(stream_len(&mut source).unwrap(), 42);
        assert_eq!(source.position(), 0);
    }
}
