//! Wialon flag constants
//!
//! Values match the Wialon remote API documentation. Only the flags this
//! crate sends are listed.

/// Base item data: name, id, class, measure units
pub const ITEM_DATAFLAG_BASE: u64 = 0x1;

// Item access flags

pub const ITEM_ACCESSFLAG_VIEW: u64 = 0x1;
pub const ITEM_ACCESSFLAG_VIEW_PROPERTIES: u64 = 0x2;
pub const ITEM_ACCESSFLAG_SET_ACL: u64 = 0x4;
pub const ITEM_ACCESSFLAG_DELETE_ITEM: u64 = 0x8;
pub const ITEM_ACCESSFLAG_EDIT_NAME: u64 = 0x10;
pub const ITEM_ACCESSFLAG_VIEW_CFIELDS: u64 = 0x20;
pub const ITEM_ACCESSFLAG_EDIT_CFIELDS: u64 = 0x40;
pub const ITEM_ACCESSFLAG_EDIT_OTHER: u64 = 0x80;
pub const ITEM_ACCESSFLAG_EDIT_IMAGE: u64 = 0x100;
pub const ITEM_ACCESSFLAG_EXECUTE_REPORTS: u64 = 0x200;
pub const ITEM_ACCESSFLAG_EDIT_SUBITEMS: u64 = 0x400;
pub const ITEM_ACCESSFLAG_MANAGE_LOG: u64 = 0x800;
pub const ITEM_ACCESSFLAG_VIEW_ADMINFIELDS: u64 = 0x1000;
pub const ITEM_ACCESSFLAG_EDIT_ADMINFIELDS: u64 = 0x2000;

// User flags

pub const ITEM_USER_USERFLAG_DISABLED: u64 = 0x1;
pub const ITEM_USER_USERFLAG_CANNOT_CHANGE_PASSWORD: u64 = 0x2;
pub const ITEM_USER_USERFLAG_CAN_CREATE_ITEMS: u64 = 0x4;
pub const ITEM_USER_USERFLAG_CANNOT_CHANGE_SETTINGS: u64 = 0x10;
pub const ITEM_USER_USERFLAG_CAN_SEND_SMS: u64 = 0x20;

/// Access a provisioned user gets on the unit assigned to them
pub const UNIT_USER_ACCESS_MASK: u64 = ITEM_ACCESSFLAG_VIEW
    | ITEM_ACCESSFLAG_VIEW_PROPERTIES
    | ITEM_ACCESSFLAG_EDIT_NAME
    | ITEM_ACCESSFLAG_VIEW_CFIELDS
    | ITEM_ACCESSFLAG_EDIT_CFIELDS
    | ITEM_ACCESSFLAG_EDIT_IMAGE
    | ITEM_ACCESSFLAG_VIEW_ADMINFIELDS;

/// Restrictions applied to newly created users
pub const NEW_USER_FLAGS: u64 =
    ITEM_USER_USERFLAG_CANNOT_CHANGE_SETTINGS | ITEM_USER_USERFLAG_CANNOT_CHANGE_PASSWORD;
