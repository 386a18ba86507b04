//! Compressed binary export of a resource tree.
//!
//! The packed form is the raw-deflate compression of the UTF-8 text
//! serialization with no additional framing; the compressor's own stream
//! format is authoritative. This is the smallest-footprint persisted form,
//! suitable for embedding into a module.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::codec::reader::decode;
use crate::codec::writer::encode;
use crate::error::{Error, Result};
use crate::except::ExceptionKindRegistry;
use crate::tree::Project;

pub fn pack(project: &Project) -> Result<Vec<u8>> {
    let text = encode(project);
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(text.as_bytes())?;
    Ok(encoder.finish()?)
}

pub fn unpack(bytes: &[u8], registry: &ExceptionKindRegistry) -> Result<Project> {
    let mut decoder = DeflateDecoder::new(bytes);
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .map_err(|e| Error::malformed(0, 0, format!("corrupt packed resource: {}", e)))?;
    decode(&text, registry)
}
