//! UUID-backed identifiers for storefront records.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(value: ::uuid::Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Catalogue category identifier.
    CategoryId
);
define_id!(
    /// Catalogue product identifier.
    ProductId
);
define_id!(
    /// Product review identifier.
    ReviewId
);
define_id!(
    /// Order identifier.
    OrderId
);
define_id!(
    /// Pricing index row identifier.
    PricingEntryId
);
define_id!(
    /// Job posting identifier.
    JobId
);
define_id!(
    /// Job application identifier.
    ApplicationId
);
define_id!(
    /// Fabrication or recycling request identifier.
    ServiceRequestId
);
define_id!(
    /// News article identifier.
    ArticleId
);
define_id!(
    /// Contact message identifier.
    MessageId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_uuid() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id: OrderId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn rejects_non_uuid() {
        assert!("order-1".parse::<ProductId>().is_err());
    }
}
