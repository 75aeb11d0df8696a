use serde::{Deserialize, Serialize};

/// Регионы, которые понимает источник данных
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// Вся страна, фильтр по региону не применяется
    Brasil,
    CentroOeste,
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

impl Region {
    /// Human readable label, as shown in the region selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Brasil => "Brasil",
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }

    /// Value sent upstream. The API only accepts lower case names and
    /// treats the empty string as "every region".
    pub fn query_value(&self) -> String {
        match self {
            Region::Brasil => String::new(),
            other => other.display_name().to_lowercase(),
        }
    }

    /// Получить все регионы в порядке отображения
    pub fn all() -> Vec<Region> {
        vec![
            Region::Brasil,
            Region::CentroOeste,
            Region::Nordeste,
            Region::Norte,
            Region::Sudeste,
            Region::Sul,
        ]
    }

    /// Case-insensitive lookup by label. An empty label maps to `Brasil`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return Some(Region::Brasil);
        }
        Self::all()
            .into_iter()
            .find(|r| r.display_name().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
