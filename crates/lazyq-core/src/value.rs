//! Heterogeneous element type and the type-tag conversions behind
//! `cast` / `of_type`.
//!
//! Statically-typed pipelines never need these: a `Sequence<Item = i64>` is
//! already an `i64` sequence. `Value` exists for opaque input (decoded
//! records, mixed feeds) where the element type is only known at runtime.

use std::any::Any;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::F64(_) => "f64",
            Value::Str(_) => "string",
            Value::Bin(_) => "binary",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bin(v)
    }
}

/// Runtime convertibility check from `Self` to `T`.
///
/// `downcast` hands the element back on failure so `of_type` can drop it and
/// `cast` can describe it. Conversions are exact: `Value::I32` does not
/// convert to `i64`.
pub trait Downcast<T>: Sized {
    fn downcast(self) -> Result<T, Self>;

    /// Human-readable type of this element, for cast errors.
    fn describe(&self) -> String;
}

macro_rules! value_downcast {
    ($ty:ty, $variant:ident) => {
        impl Downcast<$ty> for Value {
            fn downcast(self) -> Result<$ty, Self> {
                match self {
                    Value::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }

            fn describe(&self) -> String {
                self.type_name().to_string()
            }
        }
    };
}

value_downcast!(bool, Bool);
value_downcast!(i32, I32);
value_downcast!(i64, I64);
value_downcast!(f64, F64);
value_downcast!(String, Str);
value_downcast!(Vec<u8>, Bin);

impl Downcast<Value> for Value {
    fn downcast(self) -> Result<Value, Self> {
        Ok(self)
    }

    fn describe(&self) -> String {
        self.type_name().to_string()
    }
}

/// `Null` converts to `None`; anything else must convert to `T`.
impl<T> Downcast<Option<T>> for Value
where
    Value: Downcast<T>,
{
    fn downcast(self) -> Result<Option<T>, Self> {
        match self {
            Value::Null => Ok(None),
            other => Downcast::<T>::downcast(other).map(Some),
        }
    }

    fn describe(&self) -> String {
        self.type_name().to_string()
    }
}

/// Fallback for fully opaque elements.
impl<T: Any> Downcast<T> for Box<dyn Any> {
    fn downcast(self) -> Result<T, Self> {
        Box::<dyn Any>::downcast::<T>(self).map(|b| *b)
    }

    fn describe(&self) -> String {
        "opaque value".to_string()
    }
}
