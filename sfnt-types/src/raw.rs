//! types for working with raw big-endian bytes

mod sealed {
    /// A trait for the raw byte arrays used to store big-endian scalars.
    pub trait BeByteArray: Copy + AsRef<[u8]> {
        /// Must return `None` if the slice length does not equal the array length.
        fn from_slice(slice: &[u8]) -> Option<Self>;
    }

    macro_rules! be_byte_array {
        ($len:literal) => {
            impl BeByteArray for [u8; $len] {
                fn from_slice(slice: &[u8]) -> Option<Self> {
                    slice.try_into().ok()
                }
            }
        };
    }

    be_byte_array!(1);
    be_byte_array!(2);
    be_byte_array!(4);
}

use sealed::BeByteArray;

/// A trait for font scalars.
///
/// This is an internal trait for encoding and decoding big-endian bytes.
pub trait Scalar: Sized {
    /// The raw byte representation of this type.
    type Raw: BeByteArray;

    /// Create an instance of this type from raw big-endian bytes
    fn from_raw(raw: Self::Raw) -> Self;

    /// Encode this type as raw big-endian bytes
    fn to_raw(self) -> Self::Raw;

    /// Attempt to read a scalar from a slice.
    ///
    /// This will succeed if `slice.len() == Self::RAW_BYTE_LEN`; it will
    /// return `None` otherwise.
    fn read(slice: &[u8]) -> Option<Self> {
        Self::Raw::from_slice(slice).map(Self::from_raw)
    }
}

/// A trait for types with a known, constant size in a font file.
pub trait FixedSize: Sized {
    /// The raw size of this type, in bytes.
    const RAW_BYTE_LEN: usize;
}

impl<T: Scalar> FixedSize for T {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<T::Raw>();
}

/// An internal macro for implementing [`Scalar`] on newtypes over scalars.
#[macro_export]
macro_rules! newtype_scalar {
    ($name:ident, $raw:ty) => {
        impl $crate::Scalar for $name {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                self.0.to_raw()
            }

            fn from_raw(raw: $raw) -> Self {
                Self($crate::Scalar::from_raw(raw))
            }
        }
    };
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl crate::raw::Scalar for $ty {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);
