//! Collected `multipart/form-data` bodies.
//!
//! The whole body is read up front so handlers can pull fields by name in any
//! order. File parts submitted without a filename and without content are treated
//! as absent, which is what browsers send for an untouched file input.

use std::{collections::HashMap, str::FromStr};

use axum::{body::Bytes, extract::Multipart};

use crate::server::{error::AppError, util::image::encode_image};

#[derive(Debug, Default)]
pub struct FormData {
    text: HashMap<String, String>,
    files: HashMap<String, Bytes>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(name, bytes);
                }
                None => {
                    let value = field.text().await?;
                    form.text.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Takes a text field. Blank values count as missing.
    pub fn text(&mut self, name: &str) -> Option<String> {
        self.text
            .remove(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Takes and parses a text field.
    ///
    /// # Returns
    /// - `Ok(None)` - Field missing or blank
    /// - `Err(AppError::BadRequest)` - Field present but not a valid value
    pub fn parse<T: FromStr>(&mut self, name: &str) -> Result<Option<T>, AppError> {
        match self.text(name) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| AppError::bad_request(format!("Invalid value for {}", name))),
            None => Ok(None),
        }
    }

    /// Takes a file field and returns it signature-checked and base64 encoded.
    pub fn image(&mut self, name: &str) -> Result<Option<String>, AppError> {
        match self.files.remove(name) {
            Some(bytes) => encode_image(&bytes).map(Some),
            None => Ok(None),
        }
    }
}
