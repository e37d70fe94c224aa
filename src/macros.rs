//! Dispatch over the concrete element types of a grid

/// Expands `$inner_macro!(ty)` for the Rust type matching a `DType`
macro_rules! dyn_match {
    ($dtype:expr, $enum:ident, $inner_macro:ident) => {
        match $dtype {
            $enum::UInt8 => $inner_macro!(u8),
            $enum::UInt16 => $inner_macro!(u16),
            $enum::Int16 => $inner_macro!(i16),
            $enum::Int32 => $inner_macro!(i32),
            $enum::Int64 => $inner_macro!(i64),
            $enum::Float32 => $inner_macro!(f32),
            $enum::Float64 => $inner_macro!(f64),
        }
    };
}

/// Expands `$inner_macro!(Variant, array)` for the typed array held by a
/// `GridData`
macro_rules! dyn_map {
    ($data:expr, $enum:ident, $inner_macro:ident) => {
        match $data {
            $enum::UInt8(_val) => $inner_macro!(UInt8, _val),
            $enum::UInt16(_val) => $inner_macro!(UInt16, _val),
            $enum::Int16(_val) => $inner_macro!(Int16, _val),
            $enum::Int32(_val) => $inner_macro!(Int32, _val),
            $enum::Int64(_val) => $inner_macro!(Int64, _val),
            $enum::Float32(_val) => $inner_macro!(Float32, _val),
            $enum::Float64(_val) => $inner_macro!(Float64, _val),
        }
    };
}

/// Calls one method on whichever typed array a `GridData` holds
macro_rules! dyn_map_fun {
    ($data:expr, $enum:ident, $fun:ident $(, $arg:expr)*) => {
        match $data {
            $enum::UInt8(_val) => _val.$fun($($arg),*),
            $enum::UInt16(_val) => _val.$fun($($arg),*),
            $enum::Int16(_val) => _val.$fun($($arg),*),
            $enum::Int32(_val) => _val.$fun($($arg),*),
            $enum::Int64(_val) => _val.$fun($($arg),*),
            $enum::Float32(_val) => _val.$fun($($arg),*),
            $enum::Float64(_val) => _val.$fun($($arg),*),
        }
    };
}

pub(crate) use {dyn_map, dyn_map_fun, dyn_match};
