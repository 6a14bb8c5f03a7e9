/// Read a setting from the environment variable of the same name, falling back to the
/// compiled-in default in `datepick_core::config`.
#[macro_export]
macro_rules! get_datepick_setting {
    ($setting:ident) => {
        ::std::env::var(stringify!($setting))
            .unwrap_or($crate::config::$setting.to_string())
    };
    ($setting:ident, $ty:ty) => {
        match ::std::env::var(stringify!($setting)) {
            Ok(v) => match v.trim().parse::<$ty>() {
                Ok(parsed) => parsed,
                Err(_e) => {
                    ::log::warn!(
                        "Env var setting {} is not a valid {}. Using default",
                        stringify!($setting),
                        stringify!($ty)
                    );
                    $crate::config::$setting
                }
            },
            Err(_e) => $crate::config::$setting,
        }
    };
}
