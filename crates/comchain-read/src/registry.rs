//! Selector tables for the ComChain currency contracts

use comchain_primitives::Selector;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::types::ListDescriptor;
use crate::ReadError;

/// Contract status (`getContractStatus`)
pub const CONTRACT_STATUS: Selector = Selector::from_bytes([0x8b, 0x3c, 0x7c, 0x69]);
/// Account receiving the tax (`getTaxAccount`)
pub const TAX_ACCOUNT: Selector = Selector::from_bytes([0x4f, 0x2e, 0xab, 0xe0]);
/// Contract version string (`getVersion`)
pub const VERSION: Selector = Selector::from_bytes([0x54, 0xfd, 0x4d, 0x50]);

/// How the return data of an accessor is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadKind {
    /// Scaled amount (hundredths)
    Amount,
    /// Raw 48-bit number
    AccountInfo,
}

/// One entry of the accessor table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    /// Accessor name
    pub name: &'static str,
    /// Decode strategy
    pub kind: ReadKind,
    /// Entry point on the main contract
    pub selector: Selector,
}

/// Per-wallet amount reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmountQuery {
    /// Total balance
    GlobalBalance,
    /// Non-credit ("nant") balance
    NantBalance,
    /// Mutual-credit balance
    CmBalance,
    /// Mutual-credit lower limit
    CmLimitBelow,
    /// Mutual-credit upper limit
    CmLimitAbove,
}

impl AmountQuery {
    /// All amount queries
    pub const ALL: [AmountQuery; 5] = [
        AmountQuery::GlobalBalance,
        AmountQuery::NantBalance,
        AmountQuery::CmBalance,
        AmountQuery::CmLimitBelow,
        AmountQuery::CmLimitAbove,
    ];

    /// Accessor name
    pub fn name(&self) -> &'static str {
        match self {
            AmountQuery::GlobalBalance => "getGlobalBalance",
            AmountQuery::NantBalance => "getNantBalance",
            AmountQuery::CmBalance => "getCmBalance",
            AmountQuery::CmLimitBelow => "getCmLimitBelow",
            AmountQuery::CmLimitAbove => "getCmLimitAbove",
        }
    }

    /// Entry point on the main contract
    pub fn selector(&self) -> Selector {
        match self {
            AmountQuery::GlobalBalance => Selector::from_bytes([0x70, 0xa0, 0x82, 0x31]),
            AmountQuery::NantBalance => Selector::from_bytes([0xae, 0x26, 0x1a, 0xba]),
            AmountQuery::CmBalance => Selector::from_bytes([0xbb, 0xc7, 0x2a, 0x17]),
            AmountQuery::CmLimitBelow => Selector::from_bytes([0xcc, 0x88, 0x5a, 0x65]),
            AmountQuery::CmLimitAbove => Selector::from_bytes([0xae, 0x71, 0x43, 0xd6]),
        }
    }
}

/// Per-wallet account information reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountQuery {
    /// Locked / active status
    AccountStatus,
    /// Account type (personal, business, admin, ...)
    AccountType,
    /// Owner flag
    IsOwner,
    /// Tax rate
    TaxAmount,
    /// Tax rate for legal persons
    LegTaxAmount,
    /// Total issued amount
    TotalAmount,
}

impl AccountQuery {
    /// All account queries
    pub const ALL: [AccountQuery; 6] = [
        AccountQuery::AccountStatus,
        AccountQuery::AccountType,
        AccountQuery::IsOwner,
        AccountQuery::TaxAmount,
        AccountQuery::LegTaxAmount,
        AccountQuery::TotalAmount,
    ];

    /// Accessor name
    pub fn name(&self) -> &'static str {
        match self {
            AccountQuery::AccountStatus => "getAccountStatus",
            AccountQuery::AccountType => "getAccountType",
            AccountQuery::IsOwner => "getIsOwner",
            AccountQuery::TaxAmount => "getTaxAmount",
            AccountQuery::LegTaxAmount => "getLegTaxAmount",
            AccountQuery::TotalAmount => "getTotalAmount",
        }
    }

    /// Entry point on the main contract
    pub fn selector(&self) -> Selector {
        match self {
            AccountQuery::AccountStatus => Selector::from_bytes([0x61, 0x24, 0x2b, 0xdd]),
            AccountQuery::AccountType => Selector::from_bytes([0xba, 0x99, 0xaf, 0x70]),
            AccountQuery::IsOwner => Selector::from_bytes([0x2f, 0x54, 0xbf, 0x6e]),
            AccountQuery::TaxAmount => Selector::from_bytes([0x98, 0xa9, 0xcf, 0xac]),
            AccountQuery::LegTaxAmount => Selector::from_bytes([0x48, 0x45, 0x53, 0x99]),
            AccountQuery::TotalAmount => Selector::from_bytes([0x18, 0x16, 0x0d, 0xdd]),
        }
    }
}

/// Look up an accessor by name across both tables
pub fn accessor(name: &str) -> Option<Accessor> {
    let amounts = AmountQuery::ALL.iter().map(|q| Accessor {
        name: q.name(),
        kind: ReadKind::Amount,
        selector: q.selector(),
    });
    let infos = AccountQuery::ALL.iter().map(|q| Accessor {
        name: q.name(),
        kind: ReadKind::AccountInfo,
        selector: q.selector(),
    });
    amounts.chain(infos).find(|a| a.name == name)
}

/// The paginated lists exposed by the lists contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Allowances granted by the caller
    Allowance,
    /// Payment requests awaiting the caller's approval
    RequestToApprove,
    /// Requests sent by the caller, not yet answered
    PendingRequest,
    /// Delegations granted to the caller
    Delegation,
    /// Delegations granted by the caller
    MyDelegation,
    /// Requests accepted by the counterpart
    AcceptedRequest,
    /// Requests rejected by the counterpart
    RejectedRequest,
}

impl ListKind {
    /// All list kinds
    pub const ALL: [ListKind; 7] = [
        ListKind::Allowance,
        ListKind::RequestToApprove,
        ListKind::PendingRequest,
        ListKind::Delegation,
        ListKind::MyDelegation,
        ListKind::AcceptedRequest,
        ListKind::RejectedRequest,
    ];

    /// Registry key
    pub fn name(&self) -> &'static str {
        match self {
            ListKind::Allowance => "Allowance",
            ListKind::RequestToApprove => "RequestToApprove",
            ListKind::PendingRequest => "PendingRequest",
            ListKind::Delegation => "Delegation",
            ListKind::MyDelegation => "MyDelegation",
            ListKind::AcceptedRequest => "AcceptedRequest",
            ListKind::RejectedRequest => "RejectedRequest",
        }
    }

    /// Built-in selectors of this list
    pub fn default_descriptor(&self) -> ListDescriptor {
        match self {
            ListKind::Allowance => ListDescriptor::new(
                Selector::from_bytes([0xaa, 0x7a, 0xdb, 0x3d]),
                Selector::from_bytes([0xb5, 0x45, 0xb1, 0x1f]),
                Selector::from_bytes([0xdd, 0x62, 0xed, 0x3e]),
            ),
            ListKind::RequestToApprove => ListDescriptor::new(
                Selector::from_bytes([0xde, 0xbb, 0x9d, 0x28]),
                Selector::from_bytes([0x72, 0x6d, 0x0a, 0x28]),
                Selector::from_bytes([0x35, 0x37, 0xd3, 0xfa]),
            ),
            ListKind::PendingRequest => ListDescriptor::new(
                Selector::from_bytes([0x41, 0x8d, 0x0f, 0xd4]),
                Selector::from_bytes([0x0b, 0xec, 0xf9, 0x3f]),
                Selector::from_bytes([0x09, 0xa1, 0x5e, 0x43]),
            ),
            ListKind::Delegation => ListDescriptor::new(
                Selector::from_bytes([0x58, 0xfb, 0x52, 0x18]),
                Selector::from_bytes([0xca, 0x40, 0xed, 0xf1]),
                Selector::from_bytes([0x04, 0x6d, 0x33, 0x07]),
            ),
            ListKind::MyDelegation => ListDescriptor::new(
                Selector::from_bytes([0x77, 0x37, 0x78, 0x4d]),
                Selector::from_bytes([0x49, 0xbc, 0xe0, 0x8d]),
                Selector::from_bytes([0xf2, 0x41, 0x11, 0xd2]),
            ),
            ListKind::AcceptedRequest => ListDescriptor::new(
                Selector::from_bytes([0x8d, 0x76, 0x8f, 0x84]),
                Selector::from_bytes([0x59, 0xa1, 0x92, 0x1a]),
                Selector::from_bytes([0x95, 0x8c, 0xde, 0x37]),
            ),
            ListKind::RejectedRequest => ListDescriptor::new(
                Selector::from_bytes([0x20, 0xcd, 0xe8, 0xfa]),
                Selector::from_bytes([0x9a, 0xa9, 0x36, 0x6e]),
                Selector::from_bytes([0xea, 0xc9, 0xdd, 0x4d]),
            ),
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ListKind {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ReadError::Config(format!("Unknown list: {}", s)))
    }
}

/// List name to descriptor mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRegistry {
    lists: HashMap<String, ListDescriptor>,
}

impl ListRegistry {
    /// Empty registry
    pub fn empty() -> Self {
        Self {
            lists: HashMap::new(),
        }
    }

    /// Registry holding the built-in descriptors of every [`ListKind`]
    pub fn with_defaults() -> Self {
        let lists = ListKind::ALL
            .iter()
            .map(|k| (k.name().to_string(), k.default_descriptor()))
            .collect();
        Self { lists }
    }

    /// Add or replace a list
    pub fn insert(&mut self, name: impl Into<String>, descriptor: ListDescriptor) {
        self.lists.insert(name.into(), descriptor);
    }

    /// Descriptor by name
    pub fn get(&self, name: &str) -> Option<&ListDescriptor> {
        self.lists.get(name)
    }

    /// Descriptor of a known list
    pub fn descriptor(&self, kind: ListKind) -> Result<ListDescriptor, ReadError> {
        self.get(kind.name())
            .copied()
            .ok_or_else(|| ReadError::Config(format!("List not configured: {}", kind)))
    }

    /// Number of configured lists
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl Default for ListRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
