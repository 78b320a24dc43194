//! Identifier rendering shared by every generated artifact.
//!
//! The spellings produced here must match the ones already emitted into the
//! generated top-level headers and DIF headers, so any change is a breaking
//! change for generated sources.

use std::ops::Add;

/// An identifier expressed as an ordered list of segments.
///
/// `Name::from_snake_case("uart0_tx_watermark")` holds
/// `["uart0", "tx", "watermark"]` and can be rendered as a C define
/// (`UART0_TX_WATERMARK`) or a C enum constant (`kUart0TxWatermark`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    parts: Vec<String>,
}

impl Name {
    /// Creates a name from its segments.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a `snake_case` string into segments.
    pub fn from_snake_case(input: &str) -> Self {
        Self::new(input.split('_'))
    }

    /// The segments of this name.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// `uart0_tx_watermark`
    pub fn as_snake_case(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.to_lowercase())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// `Uart0TxWatermark`
    ///
    /// Two numeric segments that would otherwise run together are separated
    /// with an underscore, e.g. `["gpio", "1", "2"]` becomes `Gpio1_2`.
    pub fn as_camel_case(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            let ends_numeric = out.ends_with(|c: char| c.is_ascii_digit());
            let starts_numeric = part.starts_with(|c: char| c.is_ascii_digit());
            if ends_numeric && starts_numeric {
                out.push('_');
                out.push_str(part);
            } else {
                out.push_str(&capitalize(part));
            }
        }
        out
    }

    /// `UART0_TX_WATERMARK`
    pub fn as_c_define(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.to_uppercase())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// `kUart0TxWatermark`
    pub fn as_c_enum(&self) -> String {
        format!("k{}", self.as_camel_case())
    }

    /// `uart0_tx_watermark_t`
    pub fn as_c_type(&self) -> String {
        format!("{}_t", self.as_snake_case())
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl Add for Name {
    type Output = Name;

    fn add(mut self, rhs: Name) -> Name {
        self.parts.extend(rhs.parts);
        self
    }
}

impl Add<&Name> for Name {
    type Output = Name;

    fn add(mut self, rhs: &Name) -> Name {
        self.parts.extend(rhs.parts.iter().cloned());
        self
    }
}

impl Add<&Name> for &Name {
    type Output = Name;

    fn add(self, rhs: &Name) -> Name {
        self.clone() + rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_roundtrip() {
        let name = Name::from_snake_case("uart0_tx_watermark");
        assert_eq!(name.parts(), ["uart0", "tx", "watermark"]);
        assert_eq!(name.as_snake_case(), "uart0_tx_watermark");
    }

    #[test]
    fn test_c_define() {
        let name = Name::new(["top", "earlgrey"]) + Name::from_snake_case("uart0");
        assert_eq!(
            (name + Name::new(["base", "addr"])).as_c_define(),
            "TOP_EARLGREY_UART0_BASE_ADDR"
        );
    }

    #[test]
    fn test_c_enum() {
        let name = Name::from_snake_case("dif_uart_irq_tx_watermark");
        assert_eq!(name.as_c_enum(), "kDifUartIrqTxWatermark");
    }

    #[test]
    fn test_camel_case_lowers_tail() {
        let name = Name::new(["Alert", "ID", "aes"]);
        assert_eq!(name.as_camel_case(), "AlertIdAes");
    }

    #[test]
    fn test_camel_case_numeric_join() {
        let name = Name::from_snake_case("gpio_1_2");
        assert_eq!(name.as_camel_case(), "Gpio1_2");

        // Only digit-to-digit boundaries get the separator.
        let name = Name::from_snake_case("i2c0_fmt_threshold");
        assert_eq!(name.as_camel_case(), "I2c0FmtThreshold");
    }

    #[test]
    fn test_c_type() {
        assert_eq!(Name::new(["Dif", "UART"]).as_c_type(), "dif_uart_t");
    }

    #[test]
    fn test_empty_segments() {
        // A trailing underscore produces an empty segment; rendering stays total.
        let name = Name::from_snake_case("aes_");
        assert_eq!(name.as_camel_case(), "Aes");
        assert_eq!(name.as_c_define(), "AES_");
    }

    #[test]
    fn test_add_by_reference() {
        let top = Name::new(["top", "earlgrey"]);
        let plic = &top + &Name::new(["plic", "peripheral"]);
        assert_eq!(plic.as_c_enum(), "kTopEarlgreyPlicPeripheral");
        assert_eq!(top.parts().len(), 2);
    }
}
