//! Sign-in, profiles, roles, and user administration.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{AccountRepository, IdentityProvider};
use crate::domain::{
    Account, Error, IdentityUser, LoginCredentials, Profile, ProfileUpdate, Role, UserId,
};

/// Profile with the roles the user holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub profile: Profile,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    /// Whether the admin role is held.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

/// Account use-cases over the identity provider and the profile store.
#[derive(Clone)]
pub struct AccountService {
    identity: Arc<dyn IdentityProvider>,
    accounts: Arc<dyn AccountRepository>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Create the service.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        accounts: Arc<dyn AccountRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity,
            accounts,
            clock,
        }
    }

    /// Verify credentials and make sure the user has a profile row.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<IdentityUser, Error> {
        let user = self.identity.authenticate(credentials).await?;
        let profile = self.accounts.find_profile(&user.id).await?;
        let stale_email = profile
            .as_ref()
            .is_none_or(|profile| profile.email != user.email);
        if stale_email {
            let mut profile = profile
                .unwrap_or_else(|| Profile::empty(user.id.clone(), None, self.clock.utc()));
            profile.email.clone_from(&user.email);
            self.accounts.save_profile(&profile).await?;
        }
        info!(user_id = %user.id, "user signed in");
        Ok(user)
    }

    /// Profile and roles of the signed-in user, creating an empty profile on
    /// first access.
    pub async fn current_user(&self, user_id: &UserId) -> Result<CurrentUser, Error> {
        let profile = match self.accounts.find_profile(user_id).await? {
            Some(profile) => profile,
            None => {
                let profile = Profile::empty(user_id.clone(), None, self.clock.utc());
                self.accounts.save_profile(&profile).await?;
                profile
            }
        };
        let roles = self.accounts.roles_for(user_id).await?;
        Ok(CurrentUser { profile, roles })
    }

    /// Apply a profile update.
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<CurrentUser, Error> {
        let CurrentUser { mut profile, roles } = self.current_user(user_id).await?;
        profile.apply(update, self.clock.utc());
        self.accounts.save_profile(&profile).await?;
        Ok(CurrentUser { profile, roles })
    }

    /// Fail with `forbidden` unless the user holds the admin role.
    pub async fn require_admin(&self, user_id: &UserId) -> Result<(), Error> {
        let roles = self.accounts.roles_for(user_id).await?;
        if roles.contains(&Role::Admin) {
            Ok(())
        } else {
            Err(Error::forbidden("administrator role required"))
        }
    }

    /// Identity provider accounts merged with their roles.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        let users = self.identity.list_users().await?;
        let mut roles: HashMap<UserId, Vec<Role>> = HashMap::new();
        for (user_id, role) in self.accounts.all_roles().await? {
            roles.entry(user_id).or_default().push(role);
        }
        Ok(users
            .into_iter()
            .map(|user| {
                let held = roles.remove(&user.id).unwrap_or_default();
                Account::from_identity(user, held)
            })
            .collect())
    }

    /// Replace the target user's role.
    pub async fn set_role(&self, actor: &UserId, target: &UserId, role: Role) -> Result<(), Error> {
        if actor == target && role != Role::Admin {
            return Err(Error::conflict("administrators cannot revoke their own role"));
        }
        self.accounts.set_role(target, role).await?;
        info!(%actor, %target, %role, "user role changed");
        Ok(())
    }

    /// Delete an account at the identity provider and remove its local data.
    pub async fn delete_user(&self, actor: &UserId, target: &UserId) -> Result<(), Error> {
        if actor == target {
            return Err(Error::conflict("administrators cannot delete their own account"));
        }
        self.identity.delete_user(target).await?;
        self.accounts.delete_account_data(target).await?;
        info!(%actor, %target, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{IdentityProviderError, MockAccountRepository, MockIdentityProvider};
    use mockable::DefaultClock;
    use rstest::rstest;

    fn service(identity: MockIdentityProvider, accounts: MockAccountRepository) -> AccountService {
        AccountService::new(Arc::new(identity), Arc::new(accounts), Arc::new(DefaultClock))
    }

    fn identity_user(id: UserId) -> IdentityUser {
        IdentityUser {
            id,
            email: Some("buyer@example.com".to_owned()),
            created_at: None,
            last_sign_in_at: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn login_creates_profile_with_email() {
        let user_id = UserId::random();
        let mut identity = MockIdentityProvider::new();
        let user = identity_user(user_id.clone());
        identity.expect_authenticate().return_once(move |_| Ok(user));
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_profile().return_once(|_| Ok(None));
        accounts
            .expect_save_profile()
            .withf(|profile| profile.email.as_deref() == Some("buyer@example.com"))
            .times(1)
            .return_once(|_| Ok(()));

        let credentials =
            LoginCredentials::try_from_parts("buyer@example.com", "pw").expect("credentials");
        let signed_in = service(identity, accounts)
            .login(&credentials)
            .await
            .expect("login succeeds");
        assert_eq!(signed_in.id, user_id);
    }

    #[rstest]
    #[tokio::test]
    async fn login_maps_rejected_credentials_to_unauthorized() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_authenticate()
            .return_once(|_| Err(IdentityProviderError::invalid_credentials()));
        let credentials =
            LoginCredentials::try_from_parts("buyer@example.com", "nope").expect("credentials");

        let error = service(identity, MockAccountRepository::new())
            .login(&credentials)
            .await
            .expect_err("bad password");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case(vec![Role::Customer], Some(ErrorCode::Forbidden))]
    #[case(vec![], Some(ErrorCode::Forbidden))]
    #[case(vec![Role::Customer, Role::Admin], None)]
    #[tokio::test]
    async fn require_admin_checks_roles(
        #[case] roles: Vec<Role>,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_roles_for().return_once(move |_| Ok(roles));

        let result = service(MockIdentityProvider::new(), accounts)
            .require_admin(&UserId::random())
            .await;
        assert_eq!(result.err().map(|error| error.code()), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn list_accounts_merges_roles() {
        let admin = UserId::random();
        let buyer = UserId::random();
        let mut identity = MockIdentityProvider::new();
        let users = vec![identity_user(admin.clone()), identity_user(buyer.clone())];
        identity.expect_list_users().return_once(move || Ok(users));
        let mut accounts = MockAccountRepository::new();
        let assignments = vec![(admin.clone(), Role::Admin)];
        accounts.expect_all_roles().return_once(move || Ok(assignments));

        let listed = service(identity, accounts)
            .list_accounts()
            .await
            .expect("list succeeds");
        assert!(listed.iter().any(|a| a.id == admin && a.is_admin()));
        assert!(listed.iter().any(|a| a.id == buyer && a.roles.is_empty()));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_user_refuses_self() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_delete_user().never();
        let me = UserId::random();

        let error = service(identity, MockAccountRepository::new())
            .delete_user(&me, &me)
            .await
            .expect_err("self delete");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_user_removes_local_data_after_provider() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_delete_user().times(1).return_once(|_| Ok(()));
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_delete_account_data()
            .times(1)
            .return_once(|_| Ok(()));

        service(identity, accounts)
            .delete_user(&UserId::random(), &UserId::random())
            .await
            .expect("delete succeeds");
    }
}
