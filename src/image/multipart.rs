//! `multipart/form-data` body construction for image uploads.
//!
//! The upload endpoint expects one file part named `image` and a text field
//! `image_type`. The body is built up front so its exact content type, with
//! the generated boundary, can be handed to the transport as a header.

use crate::models::ImageType;
use crate::{Error, Result};
use std::io::Write;
use uuid::Uuid;

pub const IMAGE_FIELD: &str = "image";
pub const IMAGE_TYPE_FIELD: &str = "image_type";

/// Encoded request body and its `Content-Type` header value.
#[derive(Debug, Clone)]
pub struct EncodedBody {
    pub body: Vec<u8>,
    pub content_type: String,
}

pub struct MultipartEncoder {
    boundary: String,
}

impl MultipartEncoder {
    pub fn new() -> Self {
        Self::with_boundary(Uuid::new_v4().simple().to_string())
    }

    pub fn with_boundary(boundary: String) -> Self {
        Self { boundary }
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encodes into a fresh buffer with a new random boundary.
    pub fn encode(content: &[u8], display_name: &str, image_type: ImageType) -> Result<EncodedBody> {
        let encoder = Self::new();
        let mut body = Vec::with_capacity(content.len() + 512);
        encoder.encode_into(&mut body, content, display_name, image_type)?;

        Ok(EncodedBody {
            body,
            content_type: encoder.content_type(),
        })
    }

    pub fn encode_into<W: Write>(
        &self,
        writer: &mut W,
        content: &[u8],
        display_name: &str,
        image_type: ImageType,
    ) -> Result<()> {
        self.write_file_part(writer, IMAGE_FIELD, display_name, content)?;
        self.write_field(writer, IMAGE_TYPE_FIELD, image_type.as_str())?;
        write!(writer, "\r\n--{}--\r\n", self.boundary).map_err(Error::EncodingFailed)?;
        writer.flush().map_err(Error::EncodingFailed)
    }

    fn write_file_part<W: Write>(
        &self,
        writer: &mut W,
        field: &str,
        filename: &str,
        content: &[u8],
    ) -> Result<()> {
        write!(
            writer,
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            self.boundary,
            escape_quotes(field),
            escape_quotes(filename)
        )
        .map_err(Error::EncodingFailed)?;

        writer.write_all(content).map_err(Error::EncodingFailed)
    }

    fn write_field<W: Write>(&self, writer: &mut W, field: &str, value: &str) -> Result<()> {
        write!(
            writer,
            "\r\n--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}",
            self.boundary,
            escape_quotes(field),
            value
        )
        .map_err(Error::EncodingFailed)
    }
}

impl Default for MultipartEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
