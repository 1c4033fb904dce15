use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column name normalization
// ---------------------------------------------------------------------------

/// Trim, lowercase and replace internal spaces with underscores.
///
/// `" Precio Final "` becomes `"precio_final"`. Applying it twice is a no-op.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Normalize a whole header row. Blank headers get a positional name
/// (`column_1`, `column_2`, ...) so every column stays addressable.
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let name = normalize_column_name(h);
            if name.is_empty() {
                format!("column_{}", i + 1)
            } else {
                name
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ColumnMapping – logical field → physical column
// ---------------------------------------------------------------------------

/// Where each logical field lives in the source sheet.
///
/// Resolved once at load time; filter and aggregation code only ever sees
/// typed [`SalesRecord`](super::model::SalesRecord) fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub region: String,
    pub category: String,
    pub timestamp: String,
    pub price: String,
    pub order_metric: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::consolidated()
    }
}

impl ColumnMapping {
    /// Layout with simplified categories and an order timestamp.
    pub fn consolidated() -> Self {
        Self {
            region: "region".into(),
            category: "categoria_simplificada".into(),
            timestamp: "orden_compra_timestamp".into(),
            price: "precio_final".into(),
            order_metric: "ticket_promedio".into(),
        }
    }

    /// Layout with product categories and a purchase datetime.
    pub fn detailed() -> Self {
        Self {
            region: "region".into(),
            category: "categoria_producto".into(),
            timestamp: "fecha_compra_datetime".into(),
            price: "precio_final".into(),
            order_metric: "precio_promedio_por_pedido".into(),
        }
    }

    pub fn presets() -> [Self; 2] {
        [Self::consolidated(), Self::detailed()]
    }

    /// Pick the first preset whose columns are all present in `headers`.
    /// Falls back to the default so the caller gets a precise missing-columns
    /// error instead of a guess.
    pub fn detect(headers: &[String]) -> Self {
        Self::presets()
            .into_iter()
            .find(|m| m.missing_columns(headers).is_empty())
            .unwrap_or_default()
    }

    /// Same mapping with every name passed through [`normalize_column_name`],
    /// so hand-written config entries like `"Precio Final"` still resolve.
    pub fn normalized(&self) -> Self {
        Self {
            region: normalize_column_name(&self.region),
            category: normalize_column_name(&self.category),
            timestamp: normalize_column_name(&self.timestamp),
            price: normalize_column_name(&self.price),
            order_metric: normalize_column_name(&self.order_metric),
        }
    }

    /// Physical names in logical order: region, category, timestamp, price, metric.
    pub fn names(&self) -> [&str; 5] {
        [
            &self.region,
            &self.category,
            &self.timestamp,
            &self.price,
            &self.order_metric,
        ]
    }

    pub fn missing_columns(&self, headers: &[String]) -> Vec<String> {
        self.names()
            .into_iter()
            .filter(|name| !headers.iter().any(|h| h.as_str() == *name))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_trims_lowercases_and_underscores() {
        assert_eq!(normalize_column_name("  Precio Final "), "precio_final");
        assert_eq!(normalize_column_name("Region"), "region");
        assert_eq!(
            normalize_column_name("Orden Compra Timestamp"),
            "orden_compra_timestamp"
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["  Ticket Promedio", "REGION ", "a  b", "ya_normal", "\tTab Name"] {
            let once = normalize_column_name(raw);
            assert_eq!(normalize_column_name(&once), once, "input {raw:?}");
        }
        let row = headers(&[" Region", "Categoria Simplificada", ""]);
        let once = normalize_headers(&row);
        assert_eq!(normalize_headers(&once), once);
    }

    #[test]
    fn blank_headers_get_positional_names() {
        let row = headers(&["Region", "  ", "Precio Final"]);
        assert_eq!(
            normalize_headers(&row),
            headers(&["region", "column_2", "precio_final"])
        );
    }

    #[test]
    fn detect_picks_matching_preset() {
        let detailed = headers(&[
            "region",
            "categoria_producto",
            "fecha_compra_datetime",
            "precio_final",
            "precio_promedio_por_pedido",
            "otra",
        ]);
        assert_eq!(ColumnMapping::detect(&detailed), ColumnMapping::detailed());

        let consolidated = headers(&[
            "orden_compra_timestamp",
            "region",
            "ticket_promedio",
            "categoria_simplificada",
            "precio_final",
        ]);
        assert_eq!(
            ColumnMapping::detect(&consolidated),
            ColumnMapping::consolidated()
        );
    }

    #[test]
    fn detect_falls_back_to_default_and_reports_missing() {
        let partial = headers(&["region", "precio_final"]);
        let mapping = ColumnMapping::detect(&partial);
        assert_eq!(mapping, ColumnMapping::default());
        assert_eq!(
            mapping.missing_columns(&partial),
            headers(&[
                "categoria_simplificada",
                "orden_compra_timestamp",
                "ticket_promedio"
            ])
        );
    }

    #[test]
    fn normalized_mapping_resolves_display_names() {
        let mapping = ColumnMapping {
            region: " Region".into(),
            category: "Categoria Producto".into(),
            timestamp: "Fecha Compra Datetime".into(),
            price: "Precio Final".into(),
            order_metric: "Precio Promedio Por Pedido".into(),
        };
        assert_eq!(mapping.normalized(), ColumnMapping::detailed());
    }
}
