//! Session principal and role model.

use serde::{Deserialize, Serialize};

use crate::{
    model::user::AccountDto,
    server::model::{admin::Admin, user::User},
};

pub const ROLE_CUSTOMER: &str = "ROLE_CUSTOMER";

/// Role claim carried by an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    SuperAdmin,
    Customer,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn from_admin_role(role: entity::sea_orm_active_enums::AdminRole) -> Self {
        match role {
            entity::sea_orm_active_enums::AdminRole::Admin => Role::Admin,
            entity::sea_orm_active_enums::AdminRole::SuperAdmin => Role::SuperAdmin,
        }
    }
}

/// The authenticated account for one request.
///
/// `id` refers to the admin table for admin roles and to the user table for
/// customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i32,
    pub role: Role,
}

impl Principal {
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    /// Whether this principal may act on resources owned by customer `user_id`.
    pub fn can_access_user(&self, user_id: i32) -> bool {
        self.role.is_admin() || (self.role == Role::Customer && self.id == user_id)
    }
}

/// Account behind a principal, loaded fresh for each request.
#[derive(Debug, Clone, PartialEq)]
pub enum Account {
    Admin(Admin),
    Customer(User),
}

impl Account {
    pub fn principal(&self) -> Principal {
        match self {
            Account::Admin(admin) => Principal {
                id: admin.id,
                role: Role::from_admin_role(admin.role),
            },
            Account::Customer(user) => Principal {
                id: user.id,
                role: Role::Customer,
            },
        }
    }

    /// Whether the account may still sign in.
    pub fn is_enabled(&self) -> bool {
        match self {
            Account::Admin(admin) => admin.is_active(),
            Account::Customer(user) => user.is_approved(),
        }
    }

    pub fn into_dto(self) -> AccountDto {
        match self {
            Account::Admin(admin) => AccountDto::Admin(admin.into_dto()),
            Account::Customer(user) => AccountDto::Customer(user.into_dto()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customers_only_access_themselves() {
        let customer = Principal {
            id: 4,
            role: Role::Customer,
        };
        let admin = Principal {
            id: 4,
            role: Role::Admin,
        };

        assert!(customer.can_access_user(4));
        assert!(!customer.can_access_user(5));
        assert!(admin.can_access_user(5));
    }
}
