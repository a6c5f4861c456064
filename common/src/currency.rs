//! Supported currencies and stablecoins.
//!
//! Both sets are fixed configuration: the payout corridors Ripe operates
//! in, and the stablecoins Ripe accepts. They are enumerated at compile
//! time and never discovered at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported payout currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Philippine Peso.
    Php,
    /// Thai Baht.
    Thb,
    /// Indonesian Rupiah.
    Idr,
    /// Malaysian Ringgit.
    Myr,
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Currency; 4] = [Currency::Php, Currency::Thb, Currency::Idr, Currency::Myr];

    /// ISO 4217 currency code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Php => "PHP",
            Currency::Thb => "THB",
            Currency::Idr => "IDR",
            Currency::Myr => "MYR",
        }
    }

    /// Display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Php => "₱",
            Currency::Thb => "฿",
            Currency::Idr => "Rp",
            Currency::Myr => "RM",
        }
    }

    /// Human-readable currency name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Currency::Php => "Philippine Peso",
            Currency::Thb => "Thai Baht",
            Currency::Idr => "Indonesian Rupiah",
            Currency::Myr => "Malaysian Ringgit",
        }
    }

    /// Emoji flag for visual identification.
    pub const fn flag(&self) -> &'static str {
        match self {
            Currency::Php => "🇵🇭",
            Currency::Thb => "🇹🇭",
            Currency::Idr => "🇮🇩",
            Currency::Myr => "🇲🇾",
        }
    }

    /// Minor-unit decimal places.
    pub const fn decimal_places(&self) -> u32 {
        match self {
            Currency::Idr => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PHP" => Ok(Currency::Php),
            "THB" => Ok(Currency::Thb),
            "IDR" => Ok(Currency::Idr),
            "MYR" => Ok(Currency::Myr),
            _ => Err(UnknownCodeError(s.to_string())),
        }
    }
}

/// A supported stablecoin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stablecoin {
    /// Circle's regulated stablecoin.
    Usdc,
    /// Tether USD.
    Usdt,
    /// Global Dollar by Paxos.
    Usdg,
}

impl Stablecoin {
    /// All supported stablecoins, in display order.
    pub const ALL: [Stablecoin; 3] = [Stablecoin::Usdc, Stablecoin::Usdt, Stablecoin::Usdg];

    /// Ticker code.
    pub const fn code(&self) -> &'static str {
        match self {
            Stablecoin::Usdc => "USDC",
            Stablecoin::Usdt => "USDT",
            Stablecoin::Usdg => "USDG",
        }
    }

    /// Human-readable name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Stablecoin::Usdc => "USD Coin",
            Stablecoin::Usdt => "Tether USD",
            Stablecoin::Usdg => "Global Dollar",
        }
    }

    /// One-line issuer description.
    pub const fn description(&self) -> &'static str {
        match self {
            Stablecoin::Usdc => "Circle's regulated stablecoin",
            Stablecoin::Usdt => "World's largest stablecoin",
            Stablecoin::Usdg => "Paxos-issued stablecoin",
        }
    }
}

impl fmt::Display for Stablecoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Stablecoin {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USDC" => Ok(Stablecoin::Usdc),
            "USDT" => Ok(Stablecoin::Usdt),
            "USDG" => Ok(Stablecoin::Usdg),
            _ => Err(UnknownCodeError(s.to_string())),
        }
    }
}

/// Error for a code outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCodeError(pub String);

impl fmt::Display for UnknownCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported code: {}", self.0)
    }
}

impl std::error::Error for UnknownCodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_decimal_places() {
        assert_eq!(Currency::Php.decimal_places(), 2);
        assert_eq!(Currency::Thb.decimal_places(), 2);
        assert_eq!(Currency::Idr.decimal_places(), 0);
        assert_eq!(Currency::Myr.decimal_places(), 2);
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("php".parse::<Currency>().unwrap(), Currency::Php);
        assert_eq!("MYR".parse::<Currency>().unwrap(), Currency::Myr);
        assert!("USD".parse::<Currency>().is_err());
    }

    #[test]
    fn test_stablecoin_parse() {
        assert_eq!("usdc".parse::<Stablecoin>().unwrap(), Stablecoin::Usdc);
        assert_eq!("USDG".parse::<Stablecoin>().unwrap(), Stablecoin::Usdg);
        assert!("DAI".parse::<Stablecoin>().is_err());
    }

    #[test]
    fn test_display_matches_code() {
        for currency in Currency::ALL {
            assert_eq!(currency.to_string(), currency.code());
        }
        for coin in Stablecoin::ALL {
            assert_eq!(coin.to_string(), coin.code());
        }
    }
}
