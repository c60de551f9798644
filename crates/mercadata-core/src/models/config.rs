//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::MercadataError;

/// Main configuration for the mercadata pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MercadataConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Receipt extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum extracted-text length for a page to count as non-empty.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 1 }
    }
}

/// Receipt extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Line index assumed to start the item table when no
    /// `Descripción ... P. Unit ... Importe` header is found.
    ///
    /// Unvalidated heuristic carried over from the receipt layout; a
    /// document without the table header may be mis-segmented with no
    /// signal to the caller.
    pub fallback_items_start: usize,

    /// Label assigned when no category keyword matches.
    pub default_category: String,

    /// Ordered category table. Declaration order is significant: the
    /// first category with a matching keyword wins.
    pub categories: Vec<CategoryRule>,
}

/// One category and its keyword set, matched in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category label, stored lowercase, capitalized on output.
    pub label: String,

    /// Keywords matched case-insensitively as substrings.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fallback_items_start: 5,
            default_category: "Otros".to_string(),
            categories: default_category_rules(),
        }
    }
}

/// Built-in category keyword table for Mercadona product names.
pub fn default_category_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "frutas",
            &[
                "fruta", "banana", "manzana", "naranja", "fresa", "uvas", "pera", "kiwi",
                "sandía", "melon", "melocoton", "limon", "platano", "cereza", "ciruela",
                "mandarina", "mango", "pomelo", "aguacate", "piña", "coco", "papaya",
                "granada", "higo", "guayaba", "mora",
            ],
        ),
        CategoryRule::new(
            "lácteos",
            &[
                "leche", "yogur", "queso", "mantequilla", "crema", "nata", "kefir", "kéfir",
                "feta", "mozzarella", "parmesano", "burrata", "cheddar", "gouda", "provolone",
                "ricotta", "rulo precortado", "griego", "tiramisu", "curado cortado",
                "rulo cabra",
            ],
        ),
        CategoryRule::new(
            "carnes",
            &[
                "pollo", "res", "cerdo", "jamon", "jamón", "salchicha", "mortadela", "chorizo",
                "huevo", "pechuga", "chuleta", "conejo", "pavo", "ternera", "butifarra",
                "longaniza", "cecina", "salami", "lomo", "tocino", "salchichón", "fuet",
                "sobrasada", "cordero", "bacon", "serrano", "embutido", "salchichon",
            ],
        ),
        CategoryRule::new(
            "pescado",
            &[
                "salmón", "atun", "atún", "bacalao", "merluza", "lubina", "sardina", "pulpo",
                "calamar", "gamba", "rodaballo", "boquerones", "anchoas", "pescado",
            ],
        ),
        CategoryRule::new(
            "bebidas",
            &[
                "agua", "jugo", "refresco", "vino", "cerveza", "café", "coca cola", "aquarius",
                "ladron de manzanas", "fanta", "sprite", "tonica", "red bull", "monster",
                "pepsi", "ambar", "mahou", "estrella galicia", "alhambra", "corona",
                "heineken", "estrella damm", "cafe", "chai", "ron", "whisky", "gin", "vodka",
            ],
        ),
        CategoryRule::new(
            "panadería",
            &[
                "pan", "bollos", "baguette", "croissant", "brioche", "panecillo", "panettone",
                "chapata", "hojaldre",
            ],
        ),
        CategoryRule::new(
            "granos y cereales",
            &[
                "pasta", "arroz", "lenteja", "quinoa", "cuscus", "harina", "avena", "maiz",
                "garbanzos", "trigo", "cereal", "alubias", "penne", "tortiglioni",
                "medialuna", "canelones", "tortillas", "spaghetti", "macarron", "fideos",
                "couscous", "muesli", "digestive", "garbanzo",
            ],
        ),
        CategoryRule::new("limpieza", &["detergente", "jabón", "limpiador", "esponja"]),
        CategoryRule::new(
            "snacks",
            &[
                "patatas", "galletas", "chocolates", "golosinas", "frutos secos", "palomitas",
                "nachos", "hummus", "salsa", "dip", "anacardos", "cacahuetes", "pipas",
                "pretzels", "choco gotas",
            ],
        ),
        CategoryRule::new(
            "verduras",
            &[
                "rucula", "lechuga", "tomate", "cebolla", "ajo", "pimiento", "calabaza",
                "zanahoria", "berenjena", "calabacin", "pepino", "judia", "espinacas",
                "cilantro", "perejil", "apio", "remolacha", "coliflor", "brocoli", "oregano",
                "orégano", "brotes tiernos",
            ],
        ),
        CategoryRule::new(
            "higiene",
            &[
                "shampoo", "jabón", "pasta de dientes", "desodorante", "cepillo de dientes",
                "toallas sanitarias", "pañales", "crema", "preservativo", "basura",
                "papel higiénico", "papel higienico", "toallitas", "bayeta", "esponja",
                "pastillas antical", "champu", "acondicionador", "gel de ducha",
                "jabon de manos", "colonia", "limpia", "lavavajillas", "roll-on", "bolsa",
                "body depil",
            ],
        ),
    ]
}

impl MercadataConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| MercadataError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| MercadataError::Config(e.to_string()))?;
        Ok(std::fs::write(path, content)?)
    }
}
