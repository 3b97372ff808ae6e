//! Status and priority enums stored as plain strings inside documents.
//!
//! Each enum serializes as its `snake_case` name. The variant marked as the
//! default is what a freshly created document starts with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident (default = $default:ident) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire/storage representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {}: '{other}'. Must be one of: {}",
                        stringify!($name),
                        [$($text),+].join(", "),
                    ))),
                }
            }
        }
    };
}

define_status_enum! {
    /// Triage state of a contact form submission.
    ContactStatus (default = New) {
        New => "new",
        Read => "read",
        Replied => "replied",
        Archived => "archived",
    }
}

define_status_enum! {
    /// Triage priority of a contact form submission.
    Priority (default = Medium) {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

define_status_enum! {
    /// Payment lifecycle of a donation.
    DonationStatus (default = Pending) {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

define_status_enum! {
    /// How often a pledged donation recurs.
    DonationFrequency (default = OneTime) {
        OneTime => "one_time",
        Monthly => "monthly",
        Quarterly => "quarterly",
        Yearly => "yearly",
    }
}

define_status_enum! {
    EventStatus (default = Upcoming) {
        Upcoming => "upcoming",
        Ongoing => "ongoing",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

define_status_enum! {
    /// Publication state of a blog post.
    PostStatus (default = Draft) {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

define_status_enum! {
    /// Review state of a volunteer application.
    ApplicationStatus (default = Pending) {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Withdrawn => "withdrawn",
    }
}

define_status_enum! {
    OpportunityStatus (default = Open) {
        Open => "open",
        Filled => "filled",
        Closed => "closed",
    }
}

define_status_enum! {
    ProgramStatus (default = Active) {
        Active => "active",
        Inactive => "inactive",
        Completed => "completed",
    }
}

define_status_enum! {
    /// Fundraising campaign lifecycle.
    CampaignStatus (default = Draft) {
        Draft => "draft",
        Active => "active",
        Paused => "paused",
        Completed => "completed",
    }
}

define_status_enum! {
    /// Newsletter subscription state.
    SubscriberStatus (default = Active) {
        Active => "active",
        Unsubscribed => "unsubscribed",
        Bounced => "bounced",
    }
}
