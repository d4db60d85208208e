use marketsync_core::DataFormatError;
use marketsync_market::{FailureKind, MarketError};

/// Pipeline step a marketplace failure happened in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    FetchOffers,
    SubmitStocks,
    SubmitPrices,
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Stage::FetchOffers => "fetching offer ids",
            Stage::SubmitStocks => "submitting stocks",
            Stage::SubmitPrices => "submitting prices",
        })
    }
}

/// Failure that ended one channel's pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    #[error("{stage} failed: {source}")]
    Market {
        stage: Stage,
        #[source]
        source: MarketError,
    },
    #[error("invalid inventory data: {0}")]
    DataFormat(#[from] DataFormatError),
}

impl ChannelError {
    pub fn market(stage: Stage) -> impl FnOnce(MarketError) -> Self {
        move |source| Self::Market { stage, source }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ChannelError::Market { source, .. } => source.kind(),
            ChannelError::DataFormat(_) => FailureKind::Other,
        }
    }

    /// Short summary for the operator, separating timeouts from connection loss.
    pub fn operator_message(&self) -> String {
        match self.kind() {
            FailureKind::Timeout => format!("marketplace did not answer in time: {self}"),
            FailureKind::Connection => format!("could not connect to the marketplace: {self}"),
            FailureKind::Other => self.to_string(),
        }
    }
}
