//! Binding layer for the native units.

/// Declares a unit's entry points and binds them for both widths.
///
/// For each `fn name(args) -> ret;` this declares `<prefix>_name_f32` and
/// `<prefix>_name_f64` in an `extern "C"` block, implements the unit's
/// `Unit` trait for `f32` and `f64` on top of them, and defines a generic
/// `name` that dispatches on the width. `F` in a signature stands for the
/// float width.
macro_rules! bind_unit {
    (@ty $w:ty, F) => { $w };
    (@ty $w:ty, bool) => { bool };
    (@ty $w:ty, i32) => { i32 };

    (@width $prefix:ident, $w:ident: $(fn $name:ident($($arg:ident : $aty:tt),*) -> $ret:tt;)*) => {
        paste::paste! {
            extern "C" {
                $(
                    fn [<$prefix _ $name _ $w>](
                        $($arg: bind_unit!(@ty $w, $aty)),*
                    ) -> bind_unit!(@ty $w, $ret);
                )*
            }

            impl Unit for $w {
                $(
                    #[inline(always)]
                    fn $name($($arg: bind_unit!(@ty $w, $aty)),*) -> bind_unit!(@ty $w, $ret) {
                        // SAFETY: the entry point takes and returns scalars by
                        // value and is defined for every bit pattern.
                        unsafe { [<$prefix _ $name _ $w>]($($arg),*) }
                    }
                )*
            }
        }
    };

    ($prefix:ident: $($(#[$attr:meta])* fn $name:ident($($arg:ident : $aty:tt),*) -> $ret:tt;)*) => {
        /// Width dispatch for the entry points of this unit.
        pub trait Unit: Copy {
            $(
                #[doc = concat!("Calls `", stringify!($prefix), "_", stringify!($name), "` at this width.")]
                fn $name($($arg: bind_unit!(@ty Self, $aty)),*) -> bind_unit!(@ty Self, $ret);
            )*
        }

        bind_unit!(@width $prefix, f32: $(fn $name($($arg: $aty),*) -> $ret;)*);
        bind_unit!(@width $prefix, f64: $(fn $name($($arg: $aty),*) -> $ret;)*);

        $(
            $(#[$attr])*
            #[inline(always)]
            pub fn $name<F: Unit>($($arg: bind_unit!(@ty F, $aty)),*) -> bind_unit!(@ty F, $ret) {
                <F as Unit>::$name($($arg),*)
            }
        )*

        /// Base names of every entry point this unit exports.
        pub const EXPORTS: &[&str] = &[$(stringify!($name)),*];
    };
}
