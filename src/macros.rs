/// Declare a newtype that scans and binds exactly like the type it wraps.
///
/// ```rust
/// use sql_nullable::prelude::*;
///
/// sql_nullable::nullable_newtype! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub struct StudentId(pub i64);
/// }
///
/// let id: Nullable<StudentId> = scan(&DriverValue::Int(7))?;
/// assert_eq!(id, Nullable::Present(StudentId(7)));
/// assert_eq!(StudentId(7).bind(), DriverValue::Int(7));
/// # Ok::<(), ConversionError>(())
/// ```
#[macro_export]
macro_rules! nullable_newtype {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($inner_vis:vis $inner:ty);) => {
        $(#[$meta])*
        $vis struct $name($inner_vis $inner);

        impl $crate::Scannable for $name {
            fn scan(
                value: &$crate::DriverValue,
            ) -> ::core::result::Result<Self, $crate::ConversionError> {
                <$inner as $crate::Scannable>::scan(value).map($name)
            }
        }

        impl $crate::Bindable for $name {
            fn bind(&self) -> $crate::DriverValue {
                <$inner as $crate::Bindable>::bind(&self.0)
            }
        }
    };
}
