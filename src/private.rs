//! Support code for `#[derive(Record)]`. Not public API.
//!
//! Each field access goes through a probe wrapper and a method call on a stack of
//! references. Method resolution picks the first impl whose bounds hold, trying the
//! most-referenced impl first:
//!
//! 1. the hook (`ExtractValue` / `InjectValue`),
//! 2. the hook behind an `Option`,
//! 3. native conversion (`FieldValue`),
//! 4. an opaque fallback that reports the type as unsupported.
//!
//! The choice is made per field at compile time.

use std::any::type_name;
use std::cell::RefCell;
use std::marker::PhantomData;

use crate::{Error, ErrorCode, ExtractValue, FieldValue, InjectValue, TypeDesc, Value};

pub fn unknown_field<R: ?Sized>(field: &str) -> Error {
    Error::with_detail(
        ErrorCode::UnknownField,
        format!("{}.{field}", type_name::<R>()),
    )
}

fn opaque<T: ?Sized>(action: &str) -> Error {
    Error::with_detail(
        ErrorCode::UnsupportedFieldType,
        format!("cannot {action} {}", type_name::<T>()),
    )
}

pub struct TypeProbe<T>(PhantomData<T>);

impl<T> TypeProbe<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

pub trait DescribeNative {
    fn type_desc(&self) -> TypeDesc;
}

impl<T: FieldValue> DescribeNative for &TypeProbe<T> {
    fn type_desc(&self) -> TypeDesc {
        T::type_desc()
    }
}

pub trait DescribeOpaque {
    fn type_desc(&self) -> TypeDesc;
}

impl<T> DescribeOpaque for TypeProbe<T> {
    fn type_desc(&self) -> TypeDesc {
        TypeDesc::Opaque(type_name::<T>())
    }
}

pub struct Probe<'a, T: ?Sized>(pub &'a T);

pub trait ReadHook {
    fn read_field(&self, omit_empty: bool) -> Result<Option<Value>, Error>;
}

impl<T: ExtractValue + ?Sized> ReadHook for &&&Probe<'_, T> {
    fn read_field(&self, omit_empty: bool) -> Result<Option<Value>, Error> {
        if omit_empty && self.0.is_zero() {
            return Ok(None);
        }
        Ok(self.0.extract_value())
    }
}

pub trait ReadOptionHook {
    fn read_field(&self, omit_empty: bool) -> Result<Option<Value>, Error>;
}

// `Some` is never zero, whatever the wrapper inside holds.
impl<T: ExtractValue> ReadOptionHook for &&Probe<'_, Option<T>> {
    fn read_field(&self, _omit_empty: bool) -> Result<Option<Value>, Error> {
        Ok(self.0.as_ref().and_then(ExtractValue::extract_value))
    }
}

pub trait ReadNative {
    fn read_field(&self, omit_empty: bool) -> Result<Option<Value>, Error>;
}

impl<T: FieldValue> ReadNative for &Probe<'_, T> {
    fn read_field(&self, omit_empty: bool) -> Result<Option<Value>, Error> {
        Ok(self.0.to_value().filter(|v| !(omit_empty && v.is_zero())))
    }
}

pub trait ReadOpaque {
    fn read_field(&self, omit_empty: bool) -> Result<Option<Value>, Error>;
}

impl<T: ?Sized> ReadOpaque for Probe<'_, T> {
    fn read_field(&self, _omit_empty: bool) -> Result<Option<Value>, Error> {
        Err(opaque::<T>("read a value out of"))
    }
}

pub struct ProbeMut<'a, T: ?Sized>(RefCell<&'a mut T>);

impl<'a, T: ?Sized> ProbeMut<'a, T> {
    pub fn new(field: &'a mut T) -> Self {
        Self(RefCell::new(field))
    }
}

pub trait WriteHook {
    fn write_field(&self, value: Value) -> Result<(), Error>;
}

impl<T: InjectValue + ?Sized> WriteHook for &&&ProbeMut<'_, T> {
    fn write_field(&self, value: Value) -> Result<(), Error> {
        self.0.borrow_mut().inject_value(value)
    }
}

pub trait WriteOptionHook {
    fn write_field(&self, value: Value) -> Result<(), Error>;
}

impl<T: InjectValue + Default> WriteOptionHook for &&ProbeMut<'_, Option<T>> {
    fn write_field(&self, value: Value) -> Result<(), Error> {
        self.0
            .borrow_mut()
            .get_or_insert_with(T::default)
            .inject_value(value)
    }
}

pub trait WriteNative {
    fn write_field(&self, value: Value) -> Result<(), Error>;
}

impl<T: FieldValue> WriteNative for &ProbeMut<'_, T> {
    fn write_field(&self, value: Value) -> Result<(), Error> {
        **self.0.borrow_mut() = T::from_value(value)?;
        Ok(())
    }
}

pub trait WriteOpaque {
    fn write_field(&self, value: Value) -> Result<(), Error>;
}

impl<T: ?Sized> WriteOpaque for ProbeMut<'_, T> {
    fn write_field(&self, _value: Value) -> Result<(), Error> {
        Err(opaque::<T>("store a value into"))
    }
}
