/// Implements [`Serializable`](crate::wire::Serializable) and [`Entity`](crate::wire::Entity)
/// for a struct of `Option` fields.
///
/// Every field names its kind and its wire name. Kinds are `text` (`String`), `flag` and
/// `flag_str` (`bool`, the latter always sent as text), `date_time` (`NaiveDateTime`),
/// `date` (`NaiveDate`), `entity<T>`, `list<T>(sequence)` (`Vec<T>`) and `strings`
/// (`Vec<String>`). A trailing `=> path` maps every decoded value through a normalizing
/// function.
///
/// ## Example
///
/// ```
/// use postnl_rs::impl_entity;
/// use postnl_rs::entity::Warning;
/// use postnl_rs::wire::Sequence;
///
/// #[derive(Debug, Default)]
/// pub struct Notice {
///     pub code: Option<String>,
///     pub warnings: Option<Vec<Warning>>,
/// }
///
/// impl_entity!(Notice as "Notice" {
///     code: text = "Code";
///     warnings: list<Warning>(Sequence::Wrapped("Warning")) = "Warnings";
/// });
/// ```
#[macro_export]
macro_rules! impl_entity {
    (
        $ty:ident as $name:literal
        $(, strict = $strict:literal)?
        $(, rules = [$($rule:expr),* $(,)?])?
        {
            $( $field:ident : $kind:ident $(<$inner:ty>)? $(($sequence:expr))? = $wire:literal $(=> $map:path)? ; )*
        }
    ) => {
        impl $crate::wire::Serializable for $ty {
            fn entity_name(&self) -> &'static str {
                $name
            }

            fn properties(&self) -> ::std::vec::Vec<(&'static str, $crate::wire::Property<'_>)> {
                #[allow(unused_mut)]
                let mut properties = ::std::vec::Vec::new();
                $(
                    if let Some(value) = &self.$field {
                        properties.push((
                            $wire,
                            $crate::impl_entity!(@encode $kind value $(, $sequence)?),
                        ));
                    }
                )*
                properties
            }

            fn requires_context(&self) -> bool {
                false $(|| $strict)?
            }
        }

        impl $crate::wire::Entity for $ty {
            const NAME: &'static str = $name;
            $(const RULES: &'static [$crate::wire::Normalization] = &[$($rule),*];)?

            #[allow(unused_variables)]
            fn decode_field(
                &mut self,
                field: &str,
                value: $crate::wire::Value,
                format: $crate::wire::Format<'_>,
            ) -> $crate::PostNLResult<()> {
                match field {
                    $(
                        $wire => {
                            self.$field =
                                $crate::impl_entity!(@decode $kind $(<$inner>)? value, format $(, $sequence)?)?
                                    $(.map($map))?;
                        }
                    )*
                    _ => {}
                }
                Ok(())
            }
        }
    };

    (@encode text $value:ident) => {
        $crate::wire::Property::Text(::std::borrow::Cow::Borrowed($value.as_str()))
    };
    (@encode flag $value:ident) => {
        $crate::wire::Property::Flag(*$value)
    };
    (@encode flag_str $value:ident) => {
        $crate::wire::Property::FlagText(*$value)
    };
    (@encode date_time $value:ident) => {
        $crate::wire::Property::Text(::std::borrow::Cow::Owned($crate::wire::format_date_time($value)))
    };
    (@encode date $value:ident) => {
        $crate::wire::Property::Text(::std::borrow::Cow::Owned($crate::wire::format_date($value)))
    };
    (@encode entity $value:ident) => {
        $crate::wire::Property::Entity($value)
    };
    (@encode list $value:ident, $sequence:expr) => {
        $crate::wire::Property::List(
            $sequence,
            $value
                .iter()
                .map(|item| $crate::wire::Property::Entity(item))
                .collect(),
        )
    };
    (@encode strings $value:ident) => {
        $crate::wire::Property::List(
            $crate::wire::Sequence::Strings,
            $value
                .iter()
                .map(|item| $crate::wire::Property::Text(::std::borrow::Cow::Borrowed(item.as_str())))
                .collect(),
        )
    };

    (@decode text $value:ident, $format:ident) => {
        $crate::wire::decode_text($value)
    };
    (@decode flag $value:ident, $format:ident) => {
        $crate::wire::decode_flag($value)
    };
    (@decode flag_str $value:ident, $format:ident) => {
        $crate::wire::decode_flag($value)
    };
    (@decode date_time $value:ident, $format:ident) => {
        $crate::wire::decode_date_time($value)
    };
    (@decode date $value:ident, $format:ident) => {
        $crate::wire::decode_date($value)
    };
    (@decode entity<$inner:ty> $value:ident, $format:ident) => {
        $crate::wire::decode_entity::<$inner>($value, $format)
    };
    (@decode list<$inner:ty> $value:ident, $format:ident, $sequence:expr) => {
        $crate::wire::decode_sequence::<$inner>($value, $format, $sequence)
    };
    (@decode strings $value:ident, $format:ident) => {
        $crate::wire::decode_strings($value, $format, $crate::wire::Sequence::Strings)
    };
}
