//! # Contract Dispatcher
//!
//! Routes an [`Invocation`] to the registry API. Two contracts are served:
//!
//! | Function | users | registrar |
//! |----------|:-----:|:---------:|
//! | `instantiateUsers` | ✓ | |
//! | `instantiateRegistrar` | | ✓ |
//! | `requestNewUser` | ✓ | |
//! | `approveNewUser` | | ✓ |
//! | `rechargeAccount` | ✓ | |
//! | `viewUser` | ✓ | ✓ |
//! | `propertyRegistrationRequest` | ✓ | |
//! | `approvePropertyRegistration` | | ✓ |
//! | `viewProperty` | ✓ | ✓ |
//! | `updateProperty` / `updatePropertyStatus` | ✓ | |
//! | `purchaseProperty` | ✓ | |

use crate::config::RegistryConfig;
use crate::domain::value_objects::{parse_price, PropertyStatus};
use crate::errors::RegistryError;
use crate::invocation::{Invocation, InvocationResponse};
use crate::ports::inbound::RegistryApi;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Contract {
    Users,
    Registrar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Function {
    InstantiateUsers,
    InstantiateRegistrar,
    RequestNewUser,
    ApproveNewUser,
    RechargeAccount,
    ViewUser,
    PropertyRegistrationRequest,
    ApprovePropertyRegistration,
    ViewProperty,
    UpdatePropertyStatus,
    PurchaseProperty,
}

impl Function {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "instantiateUsers" => Self::InstantiateUsers,
            "instantiateRegistrar" => Self::InstantiateRegistrar,
            "requestNewUser" => Self::RequestNewUser,
            "approveNewUser" => Self::ApproveNewUser,
            "rechargeAccount" => Self::RechargeAccount,
            "viewUser" => Self::ViewUser,
            "propertyRegistrationRequest" => Self::PropertyRegistrationRequest,
            "approvePropertyRegistration" => Self::ApprovePropertyRegistration,
            "viewProperty" => Self::ViewProperty,
            "updateProperty" | "updatePropertyStatus" => Self::UpdatePropertyStatus,
            "purchaseProperty" => Self::PurchaseProperty,
            _ => return None,
        })
    }

    fn exposed_by(self, contract: Contract) -> bool {
        match self {
            Self::ViewUser | Self::ViewProperty => true,
            Self::InstantiateRegistrar
            | Self::ApproveNewUser
            | Self::ApprovePropertyRegistration => contract == Contract::Registrar,
            Self::InstantiateUsers
            | Self::RequestNewUser
            | Self::RechargeAccount
            | Self::PropertyRegistrationRequest
            | Self::UpdatePropertyStatus
            | Self::PurchaseProperty => contract == Contract::Users,
        }
    }
}

/// Routes invocations to a [`RegistryApi`].
pub struct Dispatcher<A: RegistryApi> {
    api: A,
    users_contract: String,
    registrar_contract: String,
}

impl<A: RegistryApi> Dispatcher<A> {
    /// Create a dispatcher serving the contract names in `config`.
    pub fn new(api: A, config: &RegistryConfig) -> Self {
        Self {
            api,
            users_contract: config.users_contract.clone(),
            registrar_contract: config.registrar_contract.clone(),
        }
    }

    /// The wrapped API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run one invocation and wrap the outcome.
    #[instrument(
        skip(self, invocation),
        fields(
            contract = %invocation.contract,
            function = %invocation.function,
            caller = %invocation.caller,
        )
    )]
    pub async fn invoke(&self, invocation: Invocation) -> InvocationResponse {
        match self.route(&invocation).await {
            Ok(payload) => InvocationResponse::Ok { payload },
            Err(err) => err.into(),
        }
    }

    fn contract(&self, name: &str) -> Result<Contract, RegistryError> {
        if name == self.users_contract {
            Ok(Contract::Users)
        } else if name == self.registrar_contract {
            Ok(Contract::Registrar)
        } else {
            Err(RegistryError::UnknownContract(name.to_string()))
        }
    }

    async fn route(&self, invocation: &Invocation) -> Result<Value, RegistryError> {
        let contract = self.contract(&invocation.contract)?;
        let function = Function::parse(&invocation.function)
            .filter(|f| f.exposed_by(contract))
            .ok_or_else(|| RegistryError::UnknownFunction {
                contract: invocation.contract.clone(),
                function: invocation.function.clone(),
            })?;

        let name = invocation.function.as_str();
        let caller = invocation.caller.as_str();
        let args = invocation.args.as_slice();

        match function {
            Function::InstantiateUsers | Function::InstantiateRegistrar => {
                expect_args::<0>(name, args)?;
                info!(contract = %invocation.contract, "contract instantiated");
                Ok(json!({ "contract": invocation.contract }))
            }
            Function::RequestNewUser => {
                let [user, email, phone, aadhar, created_at] = expect_args(name, args)?;
                to_payload(
                    self.api
                        .request_new_user(caller, user, email, phone, aadhar, created_at)
                        .await?,
                )
            }
            Function::ApproveNewUser => {
                let [user, aadhar] = expect_args(name, args)?;
                to_payload(self.api.approve_new_user(caller, user, aadhar).await?)
            }
            Function::RechargeAccount => {
                let [user, aadhar, bank_tx] = expect_args(name, args)?;
                to_payload(self.api.recharge_account(caller, user, aadhar, bank_tx).await?)
            }
            Function::ViewUser => {
                let [user, aadhar] = expect_args(name, args)?;
                to_payload(self.api.view_user(caller, user, aadhar).await?)
            }
            Function::PropertyRegistrationRequest => {
                let (property_id, owner_key, price, status) = match args {
                    [id, owner, price, status] => (id, owner.clone(), price, status),
                    [id, owner_name, owner_aadhar, price, status] => {
                        (id, self.api.owner_key(owner_name, owner_aadhar)?, price, status)
                    }
                    _ => {
                        return Err(RegistryError::InvalidArgument(format!(
                            "{name} expects 4 or 5 arguments, got {}",
                            args.len()
                        )))
                    }
                };
                let price = parse_price(price)?;
                let status: PropertyStatus = status.parse()?;
                to_payload(
                    self.api
                        .property_registration_request(caller, property_id, &owner_key, price, status)
                        .await?,
                )
            }
            Function::ApprovePropertyRegistration => {
                let [property_id] = expect_args(name, args)?;
                to_payload(self.api.approve_property_registration(caller, property_id).await?)
            }
            Function::ViewProperty => {
                let [property_id] = expect_args(name, args)?;
                to_payload(self.api.view_property(caller, property_id).await?)
            }
            Function::UpdatePropertyStatus => {
                let [property_id, status] = expect_args(name, args)?;
                let status: PropertyStatus = status.parse()?;
                to_payload(
                    self.api
                        .update_property_status(caller, property_id, status)
                        .await?,
                )
            }
            Function::PurchaseProperty => {
                let [property_id, buyer, aadhar] = expect_args(name, args)?;
                to_payload(
                    self.api
                        .purchase_property(caller, property_id, buyer, aadhar)
                        .await?,
                )
            }
        }
    }
}

fn expect_args<'a, const N: usize>(
    function: &str,
    args: &'a [String],
) -> Result<[&'a str; N], RegistryError> {
    if args.len() != N {
        return Err(RegistryError::InvalidArgument(format!(
            "{function} expects {N} arguments, got {}",
            args.len()
        )));
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

fn to_payload<T: Serialize>(value: T) -> Result<Value, RegistryError> {
    serde_json::to_value(value).map_err(|e| RegistryError::CorruptRecord {
        key: "response".to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;
    use crate::config::{DEFAULT_REGISTRAR_CONTRACT as REGISTRAR, DEFAULT_USERS_CONTRACT as USERS};
    use crate::errors::ErrorKind;
    use crate::ports::inbound::PropertyRegistryApi;
    use crate::service::{create_test_service, RegistryService};

    fn dispatcher() -> Dispatcher<RegistryService<InMemoryLedger>> {
        Dispatcher::new(create_test_service(), &RegistryConfig::default())
    }

    async fn call(
        d: &Dispatcher<RegistryService<InMemoryLedger>>,
        contract: &str,
        function: &str,
        args: &[&str],
    ) -> InvocationResponse {
        d.invoke(Invocation::new(contract, function, args, "caller")).await
    }

    #[test]
    fn test_exposure_matrix() {
        assert!(Function::ViewUser.exposed_by(Contract::Users));
        assert!(Function::ViewUser.exposed_by(Contract::Registrar));
        assert!(Function::ApproveNewUser.exposed_by(Contract::Registrar));
        assert!(!Function::ApproveNewUser.exposed_by(Contract::Users));
        assert!(!Function::PurchaseProperty.exposed_by(Contract::Registrar));
        assert_eq!(Function::parse("updateProperty"), Function::parse("updatePropertyStatus"));
        assert_eq!(Function::parse("deleteEverything"), None);
    }

    #[tokio::test]
    async fn test_instantiate() {
        let d = dispatcher();
        let response = call(&d, USERS, "instantiateUsers", &[]).await;
        assert_eq!(response.payload(), Some(&json!({ "contract": USERS })));
        assert!(call(&d, REGISTRAR, "instantiateRegistrar", &[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_contract() {
        let d = dispatcher();
        let response = call(&d, "org.example.other", "viewUser", &["A", "1"]).await;
        assert_eq!(response.error_kind(), Some(ErrorKind::UnknownContract));
    }

    #[tokio::test]
    async fn test_function_not_exposed_by_contract() {
        let d = dispatcher();
        let response = call(&d, USERS, "approveNewUser", &["Alice", "1111"]).await;
        assert_eq!(response.error_kind(), Some(ErrorKind::UnknownFunction));

        let response = call(&d, REGISTRAR, "nope", &[]).await;
        assert_eq!(response.error_kind(), Some(ErrorKind::UnknownFunction));
    }

    #[tokio::test]
    async fn test_wrong_arity() {
        let d = dispatcher();
        let response = call(&d, USERS, "viewUser", &["Alice"]).await;
        assert_eq!(response.error_kind(), Some(ErrorKind::InvalidArgument));

        let response = call(&d, USERS, "propertyRegistrationRequest", &["P1", "800"]).await;
        assert_eq!(response.error_kind(), Some(ErrorKind::InvalidArgument));
        assert!(d.api().store().is_empty());
    }

    #[tokio::test]
    async fn test_user_flow_payloads() {
        let d = dispatcher();
        let response = call(
            &d,
            USERS,
            "requestNewUser",
            &["Alice", "alice@example.com", "9999900000", "1111", "2024-01-01"],
        )
        .await;
        assert_eq!(response.payload().unwrap()["phoneNumber"], "9999900000");

        assert!(call(&d, REGISTRAR, "approveNewUser", &["Alice", "1111"]).await.is_ok());
        let response = call(&d, USERS, "rechargeAccount", &["Alice", "1111", "upg500"]).await;
        assert_eq!(response.payload().unwrap()["upgradCoins"], 500);

        let response = call(&d, REGISTRAR, "viewUser", &["Alice", "1111"]).await;
        assert_eq!(response.payload().unwrap()["name"], "Alice");
    }

    #[tokio::test]
    async fn test_property_request_by_name_and_by_key() {
        let d = dispatcher();
        call(&d, USERS, "requestNewUser", &["Alice", "e", "p", "1111", "t"]).await;
        call(&d, REGISTRAR, "approveNewUser", &["Alice", "1111"]).await;
        let owner = d.api().owner_key("Alice", "1111").unwrap();

        let by_name = call(
            &d,
            USERS,
            "propertyRegistrationRequest",
            &["P1", "Alice", "1111", "800", "onSale"],
        )
        .await;
        assert_eq!(by_name.payload().unwrap()["owner"], owner.as_str());
        assert_eq!(by_name.payload().unwrap()["status"], "ForSale");

        let by_key = call(
            &d,
            USERS,
            "propertyRegistrationRequest",
            &["P2", owner.as_str(), "300", "Registered"],
        )
        .await;
        assert_eq!(by_key.payload().unwrap()["price"], 300);
    }

    #[tokio::test]
    async fn test_malformed_price_and_status() {
        let d = dispatcher();
        call(&d, USERS, "requestNewUser", &["Alice", "e", "p", "1111", "t"]).await;
        call(&d, REGISTRAR, "approveNewUser", &["Alice", "1111"]).await;

        let response = call(
            &d,
            USERS,
            "propertyRegistrationRequest",
            &["P1", "Alice", "1111", "-5", "ForSale"],
        )
        .await;
        assert_eq!(response.error_kind(), Some(ErrorKind::InvalidPrice));

        let response = call(
            &d,
            USERS,
            "propertyRegistrationRequest",
            &["P1", "Alice", "1111", "800", "Sold"],
        )
        .await;
        assert_eq!(response.error_kind(), Some(ErrorKind::InvalidArgument));
    }
}
