/// View references, parameter-binding contracts and the rendering host seam
///
/// The router never constructs views. It hands a `ViewRef` and a typed
/// `Props` bag to the `RenderHost`, which owns mounting and unmounting.
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RouteError, RouteResult};
use crate::navigation::NavigationPhase;
use crate::table::RouteTable;
use crate::{ParamMap, Route};

/// Plain-data identifier of a renderable view
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewRef(pub String);

impl ViewRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewRef {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ViewRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared type of a view input property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    Integer,
}

/// Typed property value handed to a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Text(String),
    Integer(i64),
}

impl PropValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropValue::Integer(n) => Some(*n),
            PropValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            PropValue::Integer(_) => None,
        }
    }
}

/// Input properties of a mounted view
pub type Props = BTreeMap<String, PropValue>;

/// Parameters a view accepts as input properties, with their kinds
///
/// # Examples
///
/// ```
/// use netdash_router::{ParamKind, ViewContract};
///
/// let contract = ViewContract::new("Profile").accepts("id", ParamKind::Integer);
/// assert_eq!(contract.kind_of("id"), Some(ParamKind::Integer));
/// assert_eq!(contract.kind_of("tab"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ViewContract {
    pub view: ViewRef,
    params: BTreeMap<String, ParamKind>,
}

impl ViewContract {
    pub fn new(view: impl Into<ViewRef>) -> Self {
        Self {
            view: view.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn accepts(mut self, param: impl Into<String>, kind: ParamKind) -> Self {
        self.params.insert(param.into(), kind);
        self
    }

    pub fn kind_of(&self, param: &str) -> Option<ParamKind> {
        self.params.get(param).copied()
    }
}

/// Contracts keyed by view
///
/// Views without a registered contract accept every parameter as text.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    contracts: HashMap<ViewRef, ViewContract>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contract(mut self, contract: ViewContract) -> Self {
        self.register(contract);
        self
    }

    pub fn register(&mut self, contract: ViewContract) {
        self.contracts.insert(contract.view.clone(), contract);
    }

    pub fn contract(&self, view: &ViewRef) -> Option<&ViewContract> {
        self.contracts.get(view)
    }

    /// Checks every props-mode route against its view's contract
    ///
    /// Fails with `ContractMismatch` on the first route parameter that the
    /// view does not declare.
    pub fn validate(&self, table: &RouteTable) -> RouteResult<()> {
        for (route, pattern) in table.entries() {
            let Some(contract) = self.contract_for(route) else {
                continue;
            };
            if !route.props {
                continue;
            }
            if let Some(param) = pattern
                .param_names()
                .into_iter()
                .find(|p| contract.kind_of(p).is_none())
            {
                return Err(RouteError::ContractMismatch {
                    route: route.name.clone(),
                    view: contract.view.to_string(),
                    param: param.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Binds matched params to view input properties
    ///
    /// Props-mode routes forward every param, converted per the contract.
    /// Other routes forward nothing; their params stay reachable through the
    /// navigator's current state.
    ///
    /// ```
    /// use netdash_router::{ParamKind, ParamMap, PropValue, Route, ViewContract, ViewRegistry};
    ///
    /// let registry = ViewRegistry::new()
    ///     .with_contract(ViewContract::new("Profile").accepts("id", ParamKind::Integer));
    /// let params = ParamMap::from([("id".to_string(), "42".to_string())]);
    ///
    /// let props = registry.bind(&Route::new("Profile", "/profile/:id").with_props(), &params).unwrap();
    /// assert_eq!(props.get("id"), Some(&PropValue::Integer(42)));
    ///
    /// let props = registry.bind(&Route::new("Profile", "/profile/:id"), &params).unwrap();
    /// assert!(props.is_empty());
    /// ```
    pub fn bind(&self, route: &Route, params: &ParamMap) -> RouteResult<Props> {
        if !route.props {
            return Ok(Props::new());
        }

        let contract = self.contract_for(route);

        params
            .iter()
            .map(|(name, value)| -> RouteResult<(String, PropValue)> {
                let kind = match contract {
                    Some(c) => c.kind_of(name).ok_or_else(|| RouteError::ContractMismatch {
                        route: route.name.clone(),
                        view: c.view.to_string(),
                        param: name.clone(),
                    })?,
                    None => ParamKind::Text,
                };
                let prop = convert(kind, value).ok_or_else(|| RouteError::InvalidParam {
                    route: route.name.clone(),
                    param: name.clone(),
                    value: value.clone(),
                })?;
                Ok((name.clone(), prop))
            })
            .collect()
    }

    fn contract_for(&self, route: &Route) -> Option<&ViewContract> {
        route.view().and_then(|view| self.contracts.get(view))
    }
}

fn convert(kind: ParamKind, value: &str) -> Option<PropValue> {
    match kind {
        ParamKind::Text => Some(PropValue::Text(value.to_string())),
        ParamKind::Integer => value.parse().ok().map(PropValue::Integer),
    }
}

/// Rendering surface that mounts and unmounts views
pub trait RenderHost {
    /// Displays `view` with the given input properties
    fn mount(&mut self, view: &ViewRef, props: &Props);

    /// Removes a previously mounted view
    fn unmount(&mut self, view: &ViewRef);

    /// Observes navigation phase transitions
    fn on_phase(&mut self, _phase: NavigationPhase) {}
}
