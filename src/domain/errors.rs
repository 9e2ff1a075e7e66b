/// 書籍登録のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterBookError {
    /// 書名が空
    BlankName,
}

/// 利用者登録・名前変更のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterUserError {
    /// 名前が空
    BlankName,
}

/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanBookError {
    /// 同じ書名の貸出中履歴が既に存在する
    AlreadyLoaned,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 既に返却済み
    AlreadyReturned,
}
