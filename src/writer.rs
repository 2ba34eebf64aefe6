use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::xref::{MAX_XREF_OFFSET, Xref, XrefEntry};
use crate::{Dictionary, Document, Error, Object, Result, Stream};

impl Document {
    /// Save the document to the specified file path.
    #[inline]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<File> {
        let mut file = BufWriter::new(File::create(path)?);
        self.save_internal(&mut file)?;
        Ok(file.into_inner().map_err(|err| err.into_error())?)
    }

    /// Save the document to an arbitrary target.
    #[inline]
    pub fn save_to<W: Write>(&self, target: &mut W) -> Result<()> {
        self.save_internal(target)
    }

    /// Render the document into a single immutable byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.save_internal(&mut buffer)?;
        Ok(buffer)
    }

    fn save_internal<W: Write>(&self, target: &mut W) -> Result<()> {
        let mut target = CountingWrite {
            inner: target,
            bytes_written: 0,
        };
        let mut xref = Xref::new(self.max_id + 1);
        writeln!(target, "%PDF-{}", self.version)?;

        // BTreeMap iteration order is ascending id order, which is the order
        // the xref invariants require.
        for (&(id, generation), object) in &self.objects {
            Writer::write_indirect_object(&mut target, id, generation, object, &mut xref)?;
        }

        let xref_start = Writer::checked_offset(target.bytes_written)?;
        Writer::write_xref(&mut target, &xref)?;
        Writer::write_trailer(&mut target, self.max_id + 1)?;
        write!(target, "startxref\n{}\n%%EOF", xref_start)?;

        Ok(())
    }
}

pub struct Writer;

impl Writer {
    fn need_separator(object: &Object) -> bool {
        matches!(object, Object::Integer(_) | Object::Real(_) | Object::Reference(_))
    }

    // Positions must fit the fixed 10-digit xref field.
    fn checked_offset(offset: u64) -> Result<u64> {
        if offset > MAX_XREF_OFFSET {
            return Err(Error::OffsetOverflow(offset));
        }
        Ok(offset)
    }

    fn write_indirect_object<W: Write>(
        file: &mut CountingWrite<&mut W>, id: u32, generation: u16, object: &Object, xref: &mut Xref,
    ) -> Result<()> {
        let offset = Writer::checked_offset(file.bytes_written)?;
        xref.insert(id, XrefEntry { offset, generation });
        writeln!(file, "{} {} obj", id, generation)?;
        Writer::write_object(file, object)?;
        file.write_all(b"\nendobj\n")?;
        Ok(())
    }

    fn write_xref(file: &mut dyn Write, xref: &Xref) -> std::io::Result<()> {
        writeln!(file, "xref\n0 {}", xref.size)?;

        let mut write_xref_entry =
            |offset: u64, generation: u16, kind: char| writeln!(file, "{:>010} {:>05} {} ", offset, generation, kind);
        write_xref_entry(0, 65535, 'f')?;

        for id in 1..xref.size {
            match xref.get(id) {
                Some(entry) => write_xref_entry(entry.offset, entry.generation, 'n')?,
                None => write_xref_entry(0, 65535, 'f')?,
            }
        }
        Ok(())
    }

    fn write_trailer(file: &mut dyn Write, size: u32) -> std::io::Result<()> {
        // The trailer carries exactly Size and Root; the Catalog is always
        // object 1.
        write!(file, "trailer\n<< /Size {} /Root 1 0 R >>\n", size)
    }

    pub fn write_object(file: &mut dyn Write, object: &Object) -> std::io::Result<()> {
        match *object {
            Object::Integer(value) => {
                let mut buffer = itoa::Buffer::new();
                file.write_all(buffer.format(value).as_bytes())
            }
            Object::Real(value) => write!(file, "{:.2}", value),
            Object::Name(ref name) => Writer::write_name(file, name),
            Object::Array(ref array) => Writer::write_array(file, array),
            Object::Dictionary(ref dict) => Writer::write_dictionary(file, dict),
            Object::Stream(ref stream) => Writer::write_stream(file, stream),
            Object::Reference(id) => write!(file, "{} {} R", id.0, id.1),
        }
    }

    fn write_name(file: &mut dyn Write, name: &[u8]) -> std::io::Result<()> {
        file.write_all(b"/")?;
        for &byte in name {
            // white-space and delimiter chars are encoded to # sequences
            // also encode bytes outside of the range 33 (!) to 126 (~)
            if b" \t\n\r\x0C()<>[]{}/%#".contains(&byte) || !(33..=126).contains(&byte) {
                write!(file, "#{:02X}", byte)?;
            } else {
                file.write_all(&[byte])?;
            }
        }
        Ok(())
    }

    fn write_array(file: &mut dyn Write, array: &[Object]) -> std::io::Result<()> {
        file.write_all(b"[")?;
        let mut first = true;
        for object in array {
            if first {
                first = false;
            } else if Writer::need_separator(object) {
                file.write_all(b" ")?;
            }
            Writer::write_object(file, object)?;
        }
        file.write_all(b"]")?;
        Ok(())
    }

    fn write_dictionary(file: &mut dyn Write, dictionary: &Dictionary) -> std::io::Result<()> {
        file.write_all(b"<<")?;
        for (key, value) in dictionary {
            Writer::write_name(file, key)?;
            if Writer::need_separator(value) {
                file.write_all(b" ")?;
            }
            Writer::write_object(file, value)?;
        }
        file.write_all(b">>")?;
        Ok(())
    }

    fn write_stream(file: &mut dyn Write, stream: &Stream) -> std::io::Result<()> {
        Writer::write_dictionary(file, &stream.dict)?;
        file.write_all(b"\nstream\n")?;
        file.write_all(&stream.content)?;
        file.write_all(b"\nendstream")?;
        Ok(())
    }
}

pub struct CountingWrite<W: Write> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> Write for CountingWrite<W> {
    #[inline]
    fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
        let result = self.inner.write(buffer);
        if let Ok(bytes) = result {
            self.bytes_written += bytes as u64;
        }
        result
    }

    #[inline]
    fn write_all(&mut self, buffer: &[u8]) -> std::io::Result<()> {
        self.bytes_written += buffer.len() as u64;
        // If this returns `Err` we can’t know how many bytes were actually
        // written (if any) but that doesn’t matter since we’re gonna abort the
        // entire PDF generation anyway.
        self.inner.write_all(buffer)
    }

    #[inline]
    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary;

    #[test]
    fn renders_a_dictionary_object() {
        let mut doc = Document::new();
        doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => (2u32, 0u16),
        });
        let bytes = doc.to_bytes().unwrap();
        let expected: &[u8] = b"%PDF-1.4\n\
            1 0 obj\n<</Type/Catalog/Pages 2 0 R>>\nendobj\n\
            xref\n0 2\n\
            0000000000 65535 f \n\
            0000000009 00000 n \n\
            trailer\n<< /Size 2 /Root 1 0 R >>\n\
            startxref\n54\n%%EOF";
        assert_eq!(bytes, expected);
    }

    #[test]
    fn stream_payload_is_binary_safe() {
        let payload: Vec<u8> = (0..=255).collect();
        let mut doc = Document::new();
        doc.add_object(Stream::new(Dictionary::new(), payload.clone()));
        let bytes = doc.to_bytes().unwrap();

        let marker = b"stream\n";
        let start = bytes
            .windows(marker.len())
            .position(|window| window == marker)
            .unwrap()
            + marker.len();
        assert_eq!(&bytes[start..start + payload.len()], payload.as_slice());
        assert!(bytes[start + payload.len()..].starts_with(b"\nendstream\nendobj\n"));
    }

    #[test]
    fn stream_framing_declares_payload_length() {
        let mut doc = Document::new();
        doc.add_object(Stream::new(Dictionary::new(), b"q\nQ\n".to_vec()));
        let bytes = doc.to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("1 0 obj\n<</Length 4>>\nstream\nq\nQ\n\nendstream\nendobj\n"));
    }

    #[test]
    fn object_header_past_field_capacity_is_fatal() {
        let mut sink = Vec::new();
        let mut target = CountingWrite {
            inner: &mut sink,
            bytes_written: MAX_XREF_OFFSET + 1,
        };
        let mut xref = Xref::new(2);
        let result = Writer::write_indirect_object(&mut target, 1, 0, &Object::Integer(1), &mut xref);
        assert!(matches!(
            result,
            Err(Error::OffsetOverflow(offset)) if offset == MAX_XREF_OFFSET + 1
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn xref_start_past_field_capacity_is_fatal() {
        assert_eq!(Writer::checked_offset(MAX_XREF_OFFSET).unwrap(), MAX_XREF_OFFSET);
        assert!(matches!(
            Writer::checked_offset(MAX_XREF_OFFSET + 1),
            Err(Error::OffsetOverflow(_))
        ));
    }

    #[test]
    fn escapes_delimiters_in_names() {
        let mut bytes = Vec::new();
        Writer::write_object(&mut bytes, &Object::Name(b"name \t/x".to_vec())).unwrap();
        assert_eq!(bytes, b"/name#20#09#2Fx");
    }

    #[test]
    fn reals_render_with_two_decimals() {
        let mut bytes = Vec::new();
        Writer::write_object(&mut bytes, &Object::Real(595.28)).unwrap();
        assert_eq!(bytes, b"595.28");

        bytes.clear();
        Writer::write_object(&mut bytes, &Object::Real(20.0)).unwrap();
        assert_eq!(bytes, b"20.00");
    }

    #[test]
    fn arrays_separate_numeric_tokens() {
        let mut bytes = Vec::new();
        let media_box = Object::Array(vec![0.into(), 0.into(), 595.28.into(), 841.89.into()]);
        Writer::write_object(&mut bytes, &media_box).unwrap();
        assert_eq!(bytes, b"[0 0 595.28 841.89]");

        bytes.clear();
        let kids = Object::Array(vec![(5u32, 0u16).into(), (8u32, 0u16).into()]);
        Writer::write_object(&mut bytes, &kids).unwrap();
        assert_eq!(bytes, b"[5 0 R 8 0 R]");
    }
}
