//! ComChainReader - generic read dispatcher and named accessors

use comchain_primitives::{Address, BlockNumber, Selector, Word};

use crate::abi::{
    build_call_payload, decode_amount, decode_number, decode_string, decode_uint, Amount,
    DecodedValue,
};
use crate::registry::{self, AccountQuery, AmountQuery, ListRegistry, ReadKind};
use crate::transport::RemoteReader;
use crate::types::{BlockTag, ContractSet};
use crate::ReadError;

#[cfg(feature = "http")]
use crate::config::ReaderConfig;
#[cfg(feature = "http")]
use crate::transport::HttpReader;

/// Read-only client for one ComChain currency
pub struct ComChainReader {
    reader: Box<dyn RemoteReader>,
    contracts: ContractSet,
    lists: ListRegistry,
    block: BlockTag,
}

impl ComChainReader {
    /// Create a reader over `reader` for the given contracts
    pub fn new(reader: impl RemoteReader + 'static, contracts: ContractSet) -> Self {
        Self {
            reader: Box::new(reader),
            contracts,
            lists: ListRegistry::with_defaults(),
            block: BlockTag::default(),
        }
    }

    /// Create a reader with HTTP transport from configuration
    #[cfg(feature = "http")]
    pub fn from_config(config: &ReaderConfig) -> Result<Self, ReadError> {
        let contracts = config.contract_set()?;
        Ok(Self::new(HttpReader::new(&config.rpc_url), contracts)
            .with_registry(config.registry())
            .with_block(config.block))
    }

    /// Replace the list registry
    pub fn with_registry(mut self, lists: ListRegistry) -> Self {
        self.lists = lists;
        self
    }

    /// Set the block tag used when none is given
    pub fn with_block(mut self, block: BlockTag) -> Self {
        self.block = block;
        self
    }

    /// Configured contracts
    pub fn contracts(&self) -> &ContractSet {
        &self.contracts
    }

    /// Configured lists
    pub fn registry(&self) -> &ListRegistry {
        &self.lists
    }

    /// Default block tag
    pub fn block(&self) -> BlockTag {
        self.block
    }

    // ==================== Generic read ====================

    /// Evaluate `selector(args)` on `contract` at `block` and return the raw
    /// hex return data.
    ///
    /// Transport failures are logged and reported as
    /// [`ReadError::ContractReadFailed`], without the transport detail.
    pub async fn read(
        &self,
        contract: &Address,
        selector: Selector,
        args: &[Word],
        block: BlockTag,
    ) -> Result<String, ReadError> {
        let payload = build_call_payload(*contract, selector, args);
        tracing::debug!(
            "eth_call contract={} fn={} args={} block={}",
            contract,
            selector,
            args.len(),
            block.to_param()
        );

        self.reader
            .evaluate_call(&payload, block)
            .await
            .map_err(|e| {
                tracing::warn!("Read failed contract={} fn={}: {}", contract, selector, e);
                ReadError::ContractReadFailed {
                    contract: *contract,
                    selector,
                }
            })
    }

    /// [`read`](Self::read) at the default block
    pub(crate) async fn read_at_default(
        &self,
        contract: &Address,
        selector: Selector,
        args: &[Word],
    ) -> Result<String, ReadError> {
        self.read(contract, selector, args, self.block).await
    }

    // ==================== Account reads ====================

    /// Amount read on the main contract with the wallet as only argument
    pub async fn get_amount(
        &self,
        selector: Selector,
        wallet: &Address,
    ) -> Result<Option<Amount>, ReadError> {
        let data = self
            .read_at_default(&self.contracts.main, selector, &[Word::from(wallet)])
            .await?;
        decode_amount(&data)
    }

    /// Raw number read on the main contract with the wallet as only argument
    pub async fn get_acc_info(
        &self,
        selector: Selector,
        wallet: &Address,
    ) -> Result<Option<i64>, ReadError> {
        let data = self
            .read_at_default(&self.contracts.main, selector, &[Word::from(wallet)])
            .await?;
        decode_number(&data)
    }

    /// One of the named amount reads
    pub async fn amount(
        &self,
        query: AmountQuery,
        wallet: &Address,
    ) -> Result<Option<Amount>, ReadError> {
        self.get_amount(query.selector(), wallet).await
    }

    /// One of the named account information reads
    pub async fn account_info(
        &self,
        query: AccountQuery,
        wallet: &Address,
    ) -> Result<Option<i64>, ReadError> {
        self.get_acc_info(query.selector(), wallet).await
    }

    /// Accessor looked up by name (`getCmBalance`, `getAccountType`, ...)
    pub async fn read_named(
        &self,
        name: &str,
        wallet: &Address,
    ) -> Result<Option<DecodedValue>, ReadError> {
        let accessor = registry::accessor(name)
            .ok_or_else(|| ReadError::Config(format!("Unknown accessor: {}", name)))?;
        let value = match accessor.kind {
            ReadKind::Amount => self
                .get_amount(accessor.selector, wallet)
                .await?
                .map(DecodedValue::Amount),
            ReadKind::AccountInfo => self
                .get_acc_info(accessor.selector, wallet)
                .await?
                .map(DecodedValue::Number),
        };
        Ok(value)
    }

    /// Total balance of a wallet
    pub async fn global_balance(&self, wallet: &Address) -> Result<Option<Amount>, ReadError> {
        self.amount(AmountQuery::GlobalBalance, wallet).await
    }

    /// Status of a wallet
    pub async fn account_status(&self, wallet: &Address) -> Result<Option<i64>, ReadError> {
        self.account_info(AccountQuery::AccountStatus, wallet).await
    }

    /// Type of a wallet
    pub async fn account_type(&self, wallet: &Address) -> Result<Option<i64>, ReadError> {
        self.account_info(AccountQuery::AccountType, wallet).await
    }

    /// Total balance of a wallet as of `block`
    pub async fn historical_global_balance(
        &self,
        wallet: &Address,
        block: BlockNumber,
    ) -> Result<Option<Amount>, ReadError> {
        let data = self
            .read(
                &self.contracts.main,
                AmountQuery::GlobalBalance.selector(),
                &[Word::from(wallet)],
                BlockTag::Number(block),
            )
            .await?;
        decode_amount(&data)
    }

    // ==================== Contract globals ====================

    /// Contract status
    pub async fn contract_status(&self) -> Result<Option<i64>, ReadError> {
        let data = self
            .read_at_default(&self.contracts.main, registry::CONTRACT_STATUS, &[])
            .await?;
        decode_number(&data)
    }

    /// Account collecting the tax
    pub async fn tax_account(&self) -> Result<Option<Address>, ReadError> {
        let data = self
            .read_at_default(&self.contracts.main, registry::TAX_ACCOUNT, &[])
            .await?;
        Ok(decode_uint(&data)?.map(|v| Address::from_word(&Word::from_u256(v))))
    }

    /// Contract version string
    pub async fn version(&self) -> Result<Option<String>, ReadError> {
        let data = self
            .read_at_default(&self.contracts.main, registry::VERSION, &[])
            .await?;
        decode_string(&data)
    }

    // ==================== List support ====================

    /// Amount attached to one list entry
    pub async fn amount_for_element(
        &self,
        contract: &Address,
        selector: Selector,
        caller: &Address,
        element: &Word,
    ) -> Result<Option<Amount>, ReadError> {
        let data = self
            .read_at_default(contract, selector, &[Word::from(caller), *element])
            .await?;
        decode_amount(&data)
    }
}
