//! vCard decoder - Implements `ContactDecoderPort` using `integration_carddav`

use application::ports::{ContactDecoderPort, DecodedRecord, SourceError};
use integration_carddav::parse_vcards;

/// Decodes `.vcf` files into [`DecodedRecord`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct VCardDecoder;

impl ContactDecoderPort for VCardDecoder {
    fn decode(&self, text: &str) -> Result<Vec<DecodedRecord>, SourceError> {
        let cards = parse_vcards(text).map_err(|e| SourceError::InvalidData(e.to_string()))?;
        Ok(cards
            .into_iter()
            .map(|card| Box::new(card) as DecodedRecord)
            .collect())
    }
}
