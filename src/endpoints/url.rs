//! Request URL construction

/// Top-level prefix placed before the engine segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// `/history`
    History,
    /// `/statistics`
    Statistics,
}

/// Builds `{base}[/prefix]/engines/{e}/markets/{m}/boards/{b}/securities/{s}/{ending}.json`
///
/// Every segment is optional; absent segments are skipped.
#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    base: String,
    prefix: Option<Prefix>,
    engine: Option<String>,
    market: Option<String>,
    board: Option<String>,
    security: Option<String>,
    ending: Option<String>,
}

impl UrlBuilder {
    /// Start a URL under `base`
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    /// Put the URL under `/history`
    #[must_use]
    pub fn history(mut self) -> Self {
        self.prefix = Some(Prefix::History);
        self
    }

    /// Put the URL under `/statistics`
    #[must_use]
    pub fn statistics(mut self) -> Self {
        self.prefix = Some(Prefix::Statistics);
        self
    }

    /// Set the engine segment
    #[must_use]
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Set the market segment
    #[must_use]
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Set the board segment
    #[must_use]
    pub fn board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }

    /// Set the security segment
    #[must_use]
    pub fn security(mut self, security: impl Into<String>) -> Self {
        self.security = Some(security.into());
        self
    }

    /// Set the final path segment
    #[must_use]
    pub fn ending(mut self, ending: impl Into<String>) -> Self {
        self.ending = Some(ending.into());
        self
    }

    /// Assemble the URL
    pub fn build(&self) -> String {
        let mut url = self.base.trim_end_matches('/').to_string();

        match self.prefix {
            Some(Prefix::History) => url.push_str("/history"),
            Some(Prefix::Statistics) => url.push_str("/statistics"),
            None => {}
        }

        let segments = [
            ("engines", &self.engine),
            ("markets", &self.market),
            ("boards", &self.board),
            ("securities", &self.security),
        ];
        for (name, value) in segments {
            if let Some(value) = value {
                url.push_str(&format!("/{name}/{value}"));
            }
        }

        if let Some(ending) = &self.ending {
            url.push_str(&format!("/{ending}"));
        }

        url.push_str(".json");
        url
    }
}
