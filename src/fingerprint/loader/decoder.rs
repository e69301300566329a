use crate::fingerprint::common::error::Result;
use crate::fingerprint::loader::types::DecodedRaster;

pub trait RasterDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedRaster>;
}
