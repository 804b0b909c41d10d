//! Request bodies as column/value pairs.

/// Form-encoded body fields in first-seen order; a repeated key keeps its last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    /// Parse `application/x-www-form-urlencoded` regardless of the declared content type.
    pub fn from_form(body: &[u8]) -> Self {
        let pairs: Vec<(String, String)> = match serde_urlencoded::from_bytes(body) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "unparsable form body treated as empty");
                Vec::new()
            }
        };
        pairs.into_iter().filter(|(k, _)| !k.is_empty()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut fields: Vec<(String, String)> = Vec::new();
        for (k, v) in iter {
            match fields.iter_mut().find(|(existing, _)| *existing == k) {
                Some(slot) => slot.1 = v,
                None => fields.push((k, v)),
            }
        }
        Payload { fields }
    }
}
