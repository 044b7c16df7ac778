//! 住所の組み立て
//!
//! 郵便番号の行から上へ遡り、住所行として採用できる行を集める。
//! 調べる行は最大8行、採用は最大4行（既定値）。不採用の行は飛ばして
//! 走査を続ける。最後に郵便番号を付けて区切り文字で連結する。

use crate::classifier::rejection_with;
use crate::options::{default_options, ExtractOptions};
use crate::postcode::PostcodeMatch;
use crate::types::{Extraction, RejectedLine};

/// 郵便番号の行より上から住所行を集めて連結する
///
/// `postcode_index` が0、または調べた行がすべて不採用の場合は
/// 郵便番号だけを返す。
pub fn assemble<S: AsRef<str>>(lines: &[S], postcode_index: usize, postcode: &str) -> String {
    let postcode = PostcodeMatch {
        index: postcode_index,
        text: postcode.to_string(),
    };
    assemble_with(lines, &postcode, default_options()).address
}

/// 詳細付きで組み立てる
pub fn assemble_with<S: AsRef<str>>(
    lines: &[S],
    postcode: &PostcodeMatch,
    options: &ExtractOptions,
) -> Extraction {
    let mut accepted: Vec<String> = Vec::new();
    let mut rejected = Vec::new();
    let mut inspected = 0;

    // 範囲外のインデックスは末尾扱い
    let start = postcode.index.min(lines.len());

    for index in (0..start).rev() {
        if inspected >= options.max_inspected_lines || accepted.len() >= options.max_address_lines {
            break;
        }
        inspected += 1;

        let line = lines[index].as_ref();
        match rejection_with(line, options) {
            None => accepted.push(line.to_string()),
            Some(rejection) => rejected.push(RejectedLine {
                index,
                text: line.to_string(),
                rejection,
            }),
        }
    }

    // 下から集めたので上から順に戻す
    accepted.reverse();

    let address = accepted
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(postcode.text.as_str()))
        .collect::<Vec<_>>()
        .join(options.separator.as_str());

    Extraction {
        address,
        postcode: Some(postcode.clone()),
        address_lines: accepted,
        rejected,
    }
}
