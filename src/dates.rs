use chrono::NaiveDate;

/// 存储中日期 key 的格式 (dd.mm.yyyy)
pub const DATE_LABEL_FORMAT: &str = "%d.%m.%Y";

/// 将日期格式化为 "dd.mm.yyyy"
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// 解析 "dd.mm.yyyy" 格式的日期
pub fn parse_date(label: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(label, DATE_LABEL_FORMAT)
}

/// 生成 [start, end] 闭区间内每一天的日期 key，按时间升序
///
/// start 晚于 end 时返回空列表。
pub fn date_strings_in_range(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(format_date)
        .collect()
}

/// 区间标签: "{start} - {end}"
pub fn range_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}
