/// Declares a unit struct implementing [`CacheKey`](crate::key::CacheKey).
///
/// ```
/// use redis_connection::{cache_key, key::CacheKey};
///
/// cache_key!(ScoreKey::<u32> => "score:{}"[player: String]);
/// cache_key!(BoardKey::<Vec<u32>> => "board");
///
/// assert_eq!(ScoreKey.get_key_with_args((&"ada".to_string(),)), "score:ada");
/// assert_eq!(BoardKey.get_key(), "board");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($name:ident::<$t:ty> => $format_key:literal[$($arg:ident:$ty:ident),*]) => {
        #[doc=concat!(concat!("Cache key binding\n ## Key \n", $format_key), concat!("\n ## Value Type \n ", stringify!($t)))]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $crate::key::CacheKey for $name {
            type Value = $t;
            type Args<'r> = ($(&'r $ty,)*);

            fn get_key_with_args(&self, args: Self::Args<'_>) -> std::borrow::Cow<'static, str> {
                let ($($arg,)*) = args;

                (format!($format_key, $($arg),*)).into()
            }
        }
    };
    ($name:ident::<$t:ty> => $key:literal) => {
        #[doc=concat!(concat!("Cache key binding\n ## Key \n", $key), concat!("\n ## Value Type \n ", stringify!($t)))]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl $crate::key::CacheKey for $name {
            type Value = $t;
            type Args<'r> = ();

            fn get_key_with_args(&self, _: Self::Args<'_>) -> std::borrow::Cow<'static, str> {
                ($key).into()
            }
        }
    };
}
