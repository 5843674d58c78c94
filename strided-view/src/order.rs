//! Memory layout order.

use std::fmt;
use std::str::FromStr;

use crate::StridedError;

/// Which dimension varies fastest when walking a view in canonical order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// C-like layout: last dimension varies fastest.
    #[default]
    RowMajor,
    /// Fortran-like layout: first dimension varies fastest.
    ColumnMajor,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::RowMajor => "row-major",
            Order::ColumnMajor => "column-major",
        }
    }

    #[inline]
    pub fn is_row_major(self) -> bool {
        matches!(self, Order::RowMajor)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = StridedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row-major" => Ok(Order::RowMajor),
            "column-major" => Ok(Order::ColumnMajor),
            other => Err(StridedError::InvalidOrder(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_parse_and_display() {
        assert_eq!("row-major".parse::<Order>().unwrap(), Order::RowMajor);
        assert_eq!("column-major".parse::<Order>().unwrap(), Order::ColumnMajor);
        assert_eq!(Order::ColumnMajor.to_string(), "column-major");
        assert_eq!(Order::default(), Order::RowMajor);
    }

    #[test]
    fn test_order_parse_rejects_unknown() {
        let err = "beep".parse::<Order>().unwrap_err();
        assert_eq!(err, StridedError::InvalidOrder("beep".into()));
    }
}
