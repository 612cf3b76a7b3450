// ===============================
// src/api/room.rs
// ===============================
use crate::client::YunxinClient;
use crate::error::Result;
use crate::params::ParameterSet;
use crate::response::ResponseEnvelope;

/// Chat room message types (`msgType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgType {
    Text,
    Image,
    Voice,
    Video,
    Location,
    File,
    Tips,
    Custom,
}

impl MsgType {
    pub fn code(&self) -> i64 {
        match self {
            MsgType::Text => 0,
            MsgType::Image => 1,
            MsgType::Voice => 2,
            MsgType::Video => 3,
            MsgType::Location => 4,
            MsgType::File => 6,
            MsgType::Tips => 10,
            MsgType::Custom => 100,
        }
    }
}

/// `opt` of setMemberRole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    /// operator harus creator
    Manager,
    Normal,
    Blacklist,
    Muted,
}

impl MemberRole {
    pub fn code(&self) -> i64 {
        match self {
            MemberRole::Manager => 1,
            MemberRole::Normal => 2,
            MemberRole::Blacklist => -1,
            MemberRole::Muted => -2,
        }
    }
}

/// `type` of membersByPage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberQueryType {
    Fixed,
    NonFixed,
    OnlineFixed,
}

impl MemberQueryType {
    pub fn code(&self) -> i64 {
        match self {
            MemberQueryType::Fixed => 0,
            MemberQueryType::NonFixed => 1,
            MemberQueryType::OnlineFixed => 2,
        }
    }
}

/// `chatroom/*.action` operations.
///
/// Optional fields (announcement, ext, needNotify, notifyExt, ...) go in `options`;
/// a required field always overrides the same key in `options`.
pub struct Room<'a> {
    client: &'a YunxinClient,
}

impl<'a> Room<'a> {
    pub(crate) fn new(client: &'a YunxinClient) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        creator: &str,
        name: &str,
        options: ParameterSet,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("creator", creator)
            .with("name", name);
        self.client
            .call("chatroom/create.action", required, options)
            .await
    }

    pub async fn get(&self, roomid: i64, need_online_user_count: bool) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("needOnlineUserCount", need_online_user_count);
        self.client
            .call("chatroom/get.action", required, ParameterSet::new())
            .await
    }

    pub async fn update(&self, roomid: i64, options: ParameterSet) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new().with("roomid", roomid);
        self.client
            .call("chatroom/update.action", required, options)
            .await
    }

    /// `valid = false` menutup room, `true` membuka lagi. Operator harus creator.
    pub async fn toggle_close_stat(
        &self,
        roomid: i64,
        operator: &str,
        valid: bool,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("operator", operator)
            .with("valid", valid);
        self.client
            .call("chatroom/toggleCloseStat.action", required, ParameterSet::new())
            .await
    }

    pub async fn set_member_role(
        &self,
        roomid: i64,
        operator: &str,
        target: &str,
        opt: MemberRole,
        optvalue: bool,
        notify_ext: &str,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("operator", operator)
            .with("target", target)
            .with("opt", opt.code())
            .with("optvalue", optvalue)
            .with("notifyExt", notify_ext);
        self.client
            .call("chatroom/setMemberRole.action", required, ParameterSet::new())
            .await
    }

    /// Options: `clienttype` (1 web, 2 common, 3 wechat), `clientip`.
    pub async fn request_addr(
        &self,
        roomid: i64,
        accid: &str,
        options: ParameterSet,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("accid", accid);
        self.client
            .call("chatroom/requestAddr.action", required, options)
            .await
    }

    pub async fn send_msg(
        &self,
        roomid: i64,
        msg_id: &str,
        from_accid: &str,
        msg_type: MsgType,
        options: ParameterSet,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("msgId", msg_id)
            .with("fromAccid", from_accid)
            .with("msgType", msg_type.code());
        self.client
            .call("chatroom/sendMsg.action", required, options)
            .await
    }

    /// `mute_duration` in seconds; 0 lifts the mute.
    pub async fn temporary_mute(
        &self,
        roomid: i64,
        operator: &str,
        target: &str,
        mute_duration: i64,
        options: ParameterSet,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("operator", operator)
            .with("target", target)
            .with("muteDuration", mute_duration);
        self.client
            .call("chatroom/temporaryMute.action", required, options)
            .await
    }

    pub async fn mute_room(
        &self,
        roomid: i64,
        operator: &str,
        mute: bool,
        options: ParameterSet,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("operator", operator)
            .with("mute", mute);
        self.client
            .call("chatroom/muteRoom.action", required, options)
            .await
    }

    /// `endtime` in ms (0 = now), `limit` <= 100.
    pub async fn members_by_page(
        &self,
        roomid: i64,
        kind: MemberQueryType,
        endtime: i64,
        limit: u32,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("type", kind.code())
            .with("endtime", endtime)
            .with("limit", limit);
        self.client
            .call("chatroom/membersByPage.action", required, ParameterSet::new())
            .await
    }

    pub async fn query_members(&self, roomid: i64, accids: &[&str]) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("accids", accids);
        self.client
            .call("chatroom/queryMembers.action", required, ParameterSet::new())
            .await
    }

    pub async fn update_in_out_notification(
        &self,
        roomid: i64,
        close: bool,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("close", close);
        self.client
            .call(
                "chatroom/updateInOutNotification.action",
                required,
                ParameterSet::new(),
            )
            .await
    }

    pub async fn query_user_room_ids(&self, creator: &str) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new().with("creator", creator);
        self.client
            .call("chatroom/queryUserRoomIds.action", required, ParameterSet::new())
            .await
    }

    /// Robot kedaluwarsa setelah 24 jam. Options: `roleExt`, `notifyExt`.
    pub async fn add_robot(
        &self,
        roomid: i64,
        accids: &[&str],
        options: ParameterSet,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("accids", accids);
        self.client
            .call("chatroom/addRobot.action", required, options)
            .await
    }

    pub async fn remove_robot(&self, roomid: i64, accids: &[&str]) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("roomid", roomid)
            .with("accids", accids);
        self.client
            .call("chatroom/removeRobot.action", required, ParameterSet::new())
            .await
    }
}
