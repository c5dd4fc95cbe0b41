//! Presenter port - ユーザー向け通知の表示
//!
//! Rendering (modal vs toast) and dismissal timing belong to the presenter;
//! the service only decides what the `Notice` says.

use crate::domain::Notice;

pub trait Presenter: Send + Sync {
    fn present(&self, notice: &Notice);
}
