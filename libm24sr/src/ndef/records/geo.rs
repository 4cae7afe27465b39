// libm24sr/libm24sr/src/ndef/records/geo.rs

//! `geo:` URI record.

use crate::ndef::header::RecordHeader;
use crate::ndef::record::{NdefRecord, RecordView};
use crate::ndef::records::uri::UriRecord;

const GEO_SCHEME: &str = "geo:";

/// `geo:` URI with latitude and longitude, written with four decimals.
#[derive(Debug, Clone)]
pub struct GeoRecord {
    uri: UriRecord,
    latitude: f64,
    longitude: f64,
    dirty: bool,
}

impl GeoRecord {
    /// Position in decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let mut record = Self {
            uri: UriRecord::with_custom_type(GEO_SCHEME, ""),
            latitude,
            longitude,
            dirty: true,
        };
        record.refresh();
        record
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Move to a new position.
    pub fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.latitude = latitude;
        self.longitude = longitude;
        self.dirty = true;
    }

    /// The underlying `geo:` URI record.
    pub fn uri(&self) -> &UriRecord {
        &self.uri
    }

    fn content(&self) -> String {
        format!("{:.4},{:.4}", self.latitude, self.longitude)
    }

    /// Accepts a code-0 URI starting with `geo:` and holding two numbers.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        let uri = UriRecord::parse_with_scheme(view, GEO_SCHEME)?;
        let (lat, lon) = uri.content().split_once(',')?;
        let latitude = lat.trim().parse().ok()?;
        let longitude = lon.trim().parse().ok()?;
        Some(Self {
            uri,
            latitude,
            longitude,
            dirty: false,
        })
    }
}

impl PartialEq for GeoRecord {
    /// Positions compare at the written precision.
    fn eq(&self, other: &Self) -> bool {
        self.content() == other.content()
    }
}

impl NdefRecord for GeoRecord {
    fn header(&self) -> &RecordHeader {
        self.uri.header()
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        self.uri.header_mut()
    }

    fn type_field(&self) -> &[u8] {
        self.uri.type_field()
    }

    fn payload_len(&self) -> usize {
        self.uri.payload_len()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        self.uri.write_payload(out)
    }

    fn refresh(&mut self) {
        if self.dirty {
            let content = self.content();
            self.uri.set_content(content);
            self.dirty = false;
        }
        self.uri.refresh();
    }
}
