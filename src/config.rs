use rust_decimal::Decimal;

/// Fixed formats and constants shared by the parser and the renderer.
///
/// There is exactly one supported layout, so the only way to get a
/// `ReportConfig` outside this crate is [`ReportConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Multiplier turning an MSRP into a list price (7% flat tax).
    pub(crate) tax_rate: Decimal,
    pub(crate) expected_header: &'static str,
    pub(crate) expected_columns: usize,
    pub(crate) input_extension: &'static str,

    pub(crate) report_prefix: &'static str,
    pub(crate) report_extension: &'static str,
    pub(crate) filename_timestamp_format: &'static str,

    pub(crate) title: &'static str,
    pub(crate) title_width: usize,
    pub(crate) date_format: &'static str,
    pub(crate) indent: &'static str,
    pub(crate) make_model_width: usize,
    pub(crate) msrp_width: usize,
    pub(crate) footer_title: &'static str,
    pub(crate) total_label_width: usize,
    pub(crate) placeholder: &'static str,
}

impl ReportConfig {
    #[must_use]
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    #[must_use]
    pub fn expected_header(&self) -> &str {
        self.expected_header
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(107, 2),
            expected_header: "year,make,model,msrp",
            expected_columns: 4,
            input_extension: "csv",

            report_prefix: "REPORT_",
            report_extension: "txt",
            filename_timestamp_format: "%Y-%m-%d_%H:%M:%S_%z",

            title: "--- Vehicle Report ---",
            title_width: 62,
            date_format: "%m/%d/%Y",
            indent: "     ",
            make_model_width: 30,
            msrp_width: 15,
            footer_title: "--- Grand Total ---",
            total_label_width: 15,
            placeholder: "???",
        }
    }
}
