use std::collections::HashMap;

use super::{Book, BookType, User, UserId, UserLoanHistory, UserLoanStatus};

/// 分類ごとの蔵書数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookStat {
    pub book_type: BookType,
    pub count: i64,
}

/// 利用者1人分の貸出履歴レポート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLoanReport {
    pub name: String,
    pub books: Vec<LoanRecord>,
}

/// 貸出履歴1件分（書名と状態）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRecord {
    pub name: String,
    pub status: UserLoanStatus,
}

/// 純粋関数：分類ごとに蔵書数を集計する
///
/// 結果の並びは各分類が最初に現れた順（ソートしない）。
pub fn book_statistics(books: &[Book]) -> Vec<BookStat> {
    let mut stats: Vec<BookStat> = Vec::new();

    for book in books {
        match stats.iter_mut().find(|stat| stat.book_type == book.book_type) {
            Some(stat) => stat.count += 1,
            None => stats.push(BookStat {
                book_type: book.book_type,
                count: 1,
            }),
        }
    }

    stats
}

/// 純粋関数：利用者ごとの貸出履歴レポートを組み立てる
///
/// 履歴を持たない利用者も空のリストで含める。
/// 所有者が`users`に存在しない履歴は無視される。
pub fn user_loan_report(users: &[User], histories: &[UserLoanHistory]) -> Vec<UserLoanReport> {
    let mut by_user: HashMap<UserId, Vec<LoanRecord>> = HashMap::new();
    for history in histories {
        by_user.entry(history.user_id).or_default().push(LoanRecord {
            name: history.book_name.clone(),
            status: history.status,
        });
    }

    users
        .iter()
        .map(|user| UserLoanReport {
            name: user.name.clone(),
            books: by_user.remove(&user.id).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserLoanHistoryId, book::register_book, user::register_user};
    use chrono::Utc;

    fn history(user: &User, book_name: &str, status: UserLoanStatus) -> UserLoanHistory {
        UserLoanHistory {
            id: UserLoanHistoryId::new(),
            user_id: user.id,
            book_name: book_name.to_string(),
            status,
            loaned_at: Utc::now(),
            returned_at: None,
        }
    }

    #[test]
    fn test_book_statistics_groups_by_type() {
        let books = vec![
            register_book("A", BookType::Computer).unwrap(),
            register_book("B", BookType::Computer).unwrap(),
            register_book("C", BookType::Science).unwrap(),
        ];

        let stats = book_statistics(&books);

        assert_eq!(
            stats,
            vec![
                BookStat {
                    book_type: BookType::Computer,
                    count: 2
                },
                BookStat {
                    book_type: BookType::Science,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_book_statistics_keeps_first_encounter_order() {
        let books = vec![
            register_book("A", BookType::Society).unwrap(),
            register_book("B", BookType::Computer).unwrap(),
            register_book("C", BookType::Society).unwrap(),
            register_book("D", BookType::Economy).unwrap(),
        ];

        let order: Vec<BookType> = book_statistics(&books)
            .into_iter()
            .map(|stat| stat.book_type)
            .collect();

        assert_eq!(
            order,
            vec![BookType::Society, BookType::Computer, BookType::Economy]
        );
    }

    #[test]
    fn test_book_statistics_empty() {
        assert!(book_statistics(&[]).is_empty());
    }

    #[test]
    fn test_user_loan_report_includes_users_without_history() {
        let a = register_user("A", None).unwrap();
        let b = register_user("B", Some(20)).unwrap();
        let histories = vec![
            history(&a, "本1", UserLoanStatus::Loaned),
            history(&a, "本2", UserLoanStatus::Returned),
        ];

        let report = user_loan_report(&[a, b], &histories);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "A");
        assert_eq!(
            report[0].books,
            vec![
                LoanRecord {
                    name: "本1".to_string(),
                    status: UserLoanStatus::Loaned
                },
                LoanRecord {
                    name: "本2".to_string(),
                    status: UserLoanStatus::Returned
                },
            ]
        );
        assert_eq!(report[1].name, "B");
        assert!(report[1].books.is_empty());
    }

    #[test]
    fn test_user_loan_report_ignores_orphan_history() {
        let a = register_user("A", None).unwrap();
        let ghost = register_user("ghost", None).unwrap();
        let histories = vec![history(&ghost, "本1", UserLoanStatus::Loaned)];

        let report = user_loan_report(&[a], &histories);

        assert_eq!(report.len(), 1);
        assert!(report[0].books.is_empty());
    }
}
