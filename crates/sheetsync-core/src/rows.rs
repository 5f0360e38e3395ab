use serde::{Deserialize, Deserializer, Serialize};

/// One row of the price sheet.
///
/// Column names are matched case-sensitively against the sheet header.
/// Every field is optional: values are trimmed at ingestion and blank cells
/// become `None`. Columns not listed here are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRow {
    #[serde(rename = "SKU/CAI", default, deserialize_with = "trimmed")]
    pub code: Option<String>,
    #[serde(rename = "Marca", default, deserialize_with = "trimmed")]
    pub brand: Option<String>,
    #[serde(rename = "Modelo", default, deserialize_with = "trimmed")]
    pub model: Option<String>,
    #[serde(rename = "Medida", default, deserialize_with = "trimmed")]
    pub size: Option<String>,
    #[serde(rename = "Descripción", default, deserialize_with = "trimmed")]
    pub description: Option<String>,
    #[serde(rename = "Precio con IVA", default, deserialize_with = "trimmed")]
    pub price_with_tax: Option<String>,
    #[serde(rename = "Precio sin IVA", default, deserialize_with = "trimmed")]
    pub price_without_tax: Option<String>,
    #[serde(rename = "Cantidad en stock", default, deserialize_with = "trimmed")]
    pub stock: Option<String>,
    #[serde(rename = "Estado", default, deserialize_with = "trimmed")]
    pub status: Option<String>,
    #[serde(rename = "Handle", default, deserialize_with = "trimmed")]
    pub handle: Option<String>,
    #[serde(rename = "IMG Url", default, deserialize_with = "trimmed")]
    pub image_url: Option<String>,
    #[serde(rename = "Tag", default, deserialize_with = "trimmed")]
    pub tag: Option<String>,
    #[serde(rename = "Title", default, deserialize_with = "trimmed")]
    pub title: Option<String>,
    /// 1-based row in the source sheet or file (the header is row 1), when
    /// known.
    #[serde(skip)]
    pub sheet_row: Option<usize>,
}

fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

impl PriceRow {
    #[must_use]
    pub fn brand_text(&self) -> &str {
        self.brand.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn model_text(&self) -> &str {
        self.model.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn size_text(&self) -> &str {
        self.size.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn code_text(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn price_text(&self) -> &str {
        self.price_with_tax.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn image_text(&self) -> &str {
        self.image_url.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn tag_text(&self) -> &str {
        self.tag.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_spanish_headers_from_csv() {
        let data = "SKU/CAI,Marca,Modelo,Medida,Precio con IVA,Otra\n\
                    C123 , Michelin ,Pilot Sport 4S,225/45R17,\"150000\",ignored\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<PriceRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.code.as_deref(), Some("C123"));
        assert_eq!(row.brand.as_deref(), Some("Michelin"));
        assert_eq!(row.model.as_deref(), Some("Pilot Sport 4S"));
        assert_eq!(row.size.as_deref(), Some("225/45R17"));
        assert_eq!(row.price_with_tax.as_deref(), Some("150000"));
        assert!(row.description.is_none());
    }

    #[test]
    fn blank_cells_become_none() {
        let data = "Marca,Modelo,Descripción\nAcme,   ,\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let row: PriceRow = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(row.brand_text(), "Acme");
        assert!(row.model.is_none());
        assert_eq!(row.model_text(), "");
        assert!(row.description.is_none());
    }

    #[test]
    fn deserializes_from_json_object() {
        let row: PriceRow =
            serde_json::from_str(r#"{"Marca":"Acme","Modelo":"X1","IMG Url":" http://img/1.jpg "}"#)
                .unwrap();
        assert_eq!(row.image_text(), "http://img/1.jpg");
        assert!(row.code.is_none());
        assert!(row.sheet_row.is_none());
    }
}
