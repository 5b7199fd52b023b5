// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::str::FromStr;

use nom::Err;

use crate::nameserver::NameServer;
use crate::Error;

impl FromStr for NameServer {
    type Err = Error;

    fn from_str(str: &str) -> std::result::Result<Self, Self::Err> {
        match parser::parsed_name_server(str.trim()) {
            Ok(("", result)) => Ok(result.into()),
            Ok((rest, _)) => Err(Error::ParserError {
                what: rest.to_string(),
                to: "NameServer",
                why: "unexpected trailing input; host names are not supported".to_string(),
            }),
            Err(Err::Incomplete(_)) => Err(Error::ParserError {
                what: str.to_string(),
                to: "NameServer",
                why: "input is incomplete".to_string(),
            }),
            Err(Err::Error(e)) | Err(Err::Failure(e)) => Err(Error::ParserError {
                what: e.input.to_string(),
                to: "NameServer",
                why: e.code.description().to_string(),
            }),
        }
    }
}

impl<'a> From<parser::NameServer<'a>> for NameServer {
    fn from(parsed: parser::NameServer<'a>) -> Self {
        let name = parsed.name.map(ToString::to_string);
        NameServer::new(parsed.protocol, (parsed.ip_addr, parsed.port), name)
    }
}

mod parser {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use std::str::FromStr;

    use nom::branch::alt;
    use nom::bytes::complete::{tag, take_while, take_while1};
    use nom::character::complete::digit1;
    use nom::combinator::{map, map_res, opt};
    use nom::sequence::{delimited, preceded};
    use nom::IResult;

    use crate::nameserver::Protocol;

    #[derive(Debug, PartialEq, Eq)]
    pub(crate) struct NameServer<'a> {
        pub(crate) protocol: Protocol,
        pub(crate) ip_addr: IpAddr,
        pub(crate) port: u16,
        pub(crate) name: Option<&'a str>,
    }

    pub(crate) fn parsed_name_server(input: &str) -> IResult<&str, NameServer> {
        let (input, protocol) = opt(protocol)(input)?;
        let (input, ip_addr) = alt((bracketed_ipv6, ipv4, ipv6))(input)?;
        let (input, port) = opt(port)(input)?;
        let (input, name) = opt(ns_name)(input)?;

        let name_server = NameServer {
            protocol: protocol.unwrap_or(Protocol::Udp),
            ip_addr,
            port: port.unwrap_or(53),
            name,
        };

        Ok((input, name_server))
    }

    fn protocol(input: &str) -> IResult<&str, Protocol> {
        let (input, protocol) = map_res(alt((tag("udp"), tag("tcp"))), Protocol::from_str)(input)?;

        let (input, _) = tag(":")(input)?;
        let (input, _) = opt(tag("//"))(input)?;

        Ok((input, protocol))
    }

    fn ipv4(input: &str) -> IResult<&str, IpAddr> {
        map(
            map_res(take_while(|c: char| c.is_ascii_digit() || c == '.'), Ipv4Addr::from_str),
            IpAddr::V4,
        )(input)
    }

    fn raw_ipv6(input: &str) -> IResult<&str, Ipv6Addr> {
        map_res(
            take_while(|c: char| c.is_ascii_hexdigit() || c == ':' || c == '.'),
            Ipv6Addr::from_str,
        )(input)
    }

    // An unbracketed IPv6 address consumes every trailing ':'; a port requires brackets.
    fn ipv6(input: &str) -> IResult<&str, IpAddr> {
        map(raw_ipv6, IpAddr::V6)(input)
    }

    fn bracketed_ipv6(input: &str) -> IResult<&str, IpAddr> {
        map(delimited(tag("["), raw_ipv6, tag("]")), IpAddr::V6)(input)
    }

    fn port(input: &str) -> IResult<&str, u16> {
        preceded(tag(":"), map_res(digit1, |x: &str| x.parse::<u16>()))(input)
    }

    fn ns_name(input: &str) -> IResult<&str, &str> {
        preceded(
            tag(",name="),
            take_while1(|c: char| c.is_alphanumeric() || c == '.' || c == '-' || c == ' '),
        )(input)
    }

}
