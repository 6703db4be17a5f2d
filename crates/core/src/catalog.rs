//! Quick tools catalogue and search
//!
//! Plain case-insensitive substring matching over name, description and
//! tags. Results keep catalogue order and are capped at three.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Maximum number of search results returned
pub const MAX_SEARCH_RESULTS: usize = 3;

/// A tool shown on the quick tools page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickTool {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Internal route or external URL
    pub weblink: String,
    /// Alternative names
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hint: Option<String>,
}

impl QuickTool {
    /// `needle` must already be lowercase
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    pub fn is_external(&self) -> bool {
        self.weblink.starts_with("http://") || self.weblink.starts_with("https://")
    }
}

fn tool(
    id: &str,
    name: &str,
    description: &str,
    weblink: &str,
    tags: &[&str],
    image_hint: &str,
) -> QuickTool {
    QuickTool {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        weblink: weblink.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image_hint: Some(image_hint.to_string()),
    }
}

static BUILTIN_TOOLS: Lazy<Vec<QuickTool>> = Lazy::new(|| {
    vec![
        tool(
            "tool1",
            "GST Calculator",
            "Calculates the Goods and Services Tax (GST) amount for various tax slabs in India.",
            "/tools/gst-calculator",
            &["GST rate calculator", "Tax calculator", "Indian GST tool"],
            "calculator tax",
        ),
        tool(
            "tool2",
            "EMI Calculator",
            "Calculates monthly EMI based on loan amount, interest rate, and tenure.",
            "/tools/emi-calculator",
            &["Loan calculator", "Interest calculator", "Monthly EMI calculator"],
            "calculator loan",
        ),
        tool(
            "tool3",
            "Currency Converter",
            "Converts currency values using real-time exchange rates between global currencies.",
            "https://www.xe.com/currencyconverter/",
            &["Forex converter", "Money exchange rate", "Currency exchange tool"],
            "currency exchange",
        ),
        tool(
            "tool4",
            "Image Converter",
            "Converts image files between formats like JPG, PNG, GIF, BMP, and WEBP.",
            "https://convertio.co/image-converter/",
            &["PNG to JPG", "Image format change", "Online image converter"],
            "image file",
        ),
        tool(
            "tool5",
            "File Converter",
            "Converts files across various formats including documents, videos, audio, and more.",
            "https://www.zamzar.com/",
            &["Online converter", "Format changer", "Document converter"],
            "file document",
        ),
        tool(
            "tool6",
            "Bank IFSC Finder",
            "Finds IFSC, MICR codes, and other details of Indian bank branches.",
            "https://www.bankbazaar.com/ifsc-code.html",
            &["IFSC search", "Bank code finder", "Bank branch locator"],
            "bank building",
        ),
        tool(
            "tool7",
            "QR Code Generator",
            "Generates QR codes for URLs, contact info, text, WiFi passwords, and more.",
            "https://www.qr-code-generator.com/",
            &["QR creator", "Barcode generator", "QR code maker"],
            "qr code",
        ),
    ]
});

/// Ordered list of quick tools
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolCatalog {
    tools: Vec<QuickTool>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<QuickTool>) -> Self {
        Self { tools }
    }

    /// The catalogue shipped with the site
    pub fn builtin() -> Self {
        Self::new(BUILTIN_TOOLS.clone())
    }

    pub fn tools(&self) -> &[QuickTool] {
        &self.tools
    }

    pub fn get(&self, id: &str) -> Option<&QuickTool> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Search with the default result cap
    pub fn search(&self, query: &str) -> Vec<&QuickTool> {
        self.search_limited(query, MAX_SEARCH_RESULTS)
    }

    /// Search returning at most `limit` tools; a blank query matches nothing
    pub fn search_limited(&self, query: &str, limit: usize) -> Vec<&QuickTool> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.tools
            .iter()
            .filter(|t| t.matches(&needle))
            .take(limit)
            .collect()
    }
}
